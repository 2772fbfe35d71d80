//! Self energies of the normal leads
//!
//! The leads are treated in the wide-band limit, so the retarded self-energy is independent of energy:
//!
//! `Σ^R = -i/2 (Γ_L + Γ_R)`
//!
//! where `Γ_L` and `Γ_R` are the diagonal lead-coupling matrices of the scattering region. In the dot-Majorana
//! model only the dot couples to the leads, so only the `(0, 0)` element is non-zero, but the coupling matrices
//! are stored in full so the Majorana index can be coupled without changing the Green's function or transmission code.

use nalgebra::{Matrix2, RealField, Vector2};
use num_complex::Complex;

/// An InfoDesk trait providing the lead couplings to the dot
pub trait SelfEnergyInfoDesk<T: RealField> {
    /// The coupling `Γ_L` of the dot to the left lead
    fn left_lead_coupling(&self) -> T;
    /// The coupling `Γ_R` of the dot to the right lead
    fn right_lead_coupling(&self) -> T;
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The wide-band self energy of the two leads
pub struct SelfEnergy<T: Copy + RealField> {
    /// Diagonal of the left lead-coupling matrix `Γ_L`
    left: Vector2<T>,
    /// Diagonal of the right lead-coupling matrix `Γ_R`
    right: Vector2<T>,
}

impl<T: Copy + RealField> SelfEnergy<T> {
    /// Construct the self-energy from the diagonals of the two lead-coupling matrices
    pub fn from_lead_couplings(left: Vector2<T>, right: Vector2<T>) -> Self {
        Self { left, right }
    }

    /// Construct the self-energy of leads which couple only to the dot
    pub fn from_info_desk<InfoDesk: SelfEnergyInfoDesk<T>>(info_desk: &InfoDesk) -> Self {
        Self::from_lead_couplings(
            Vector2::new(info_desk.left_lead_coupling(), T::zero()),
            Vector2::new(info_desk.right_lead_coupling(), T::zero()),
        )
    }

    /// The diagonal of `Γ_L`
    pub fn left_coupling(&self) -> &Vector2<T> {
        &self.left
    }

    /// The diagonal of `Γ_R`
    pub fn right_coupling(&self) -> &Vector2<T> {
        &self.right
    }

    /// The retarded self-energy matrix
    pub fn retarded(&self) -> Matrix2<Complex<T>> {
        let half = T::one() / (T::one() + T::one());
        Matrix2::from_diagonal(
            &(self.left + self.right).map(|gamma| Complex::new(T::zero(), -gamma * half)),
        )
    }

    /// The advanced self-energy matrix, the Hermitian conjugate of the retarded one
    pub fn advanced(&self) -> Matrix2<Complex<T>> {
        crate::utilities::matrices::conjugate_transpose(&self.retarded())
    }
}

#[cfg(test)]
mod test {
    use super::{SelfEnergy, SelfEnergyInfoDesk};
    use crate::utilities::matrices::is_anti_hermitian;
    use nalgebra::Vector2;
    use num_complex::Complex;

    struct Leads;

    impl SelfEnergyInfoDesk<f64> for Leads {
        fn left_lead_coupling(&self) -> f64 {
            0.05
        }
        fn right_lead_coupling(&self) -> f64 {
            0.07
        }
    }

    #[test]
    fn only_the_dot_element_is_broadened() {
        let self_energy = SelfEnergy::from_info_desk(&Leads);
        let retarded = self_energy.retarded();
        approx::assert_relative_eq!(retarded[(0, 0)].im, -0.06, epsilon = 1e-15);
        assert_eq!(retarded[(0, 0)].re, 0.);
        assert_eq!(retarded[(0, 1)], Complex::from(0.));
        assert_eq!(retarded[(1, 0)], Complex::from(0.));
        assert_eq!(retarded[(1, 1)], Complex::from(0.));
    }

    #[test]
    fn retarded_self_energy_is_anti_hermitian() {
        let self_energy =
            SelfEnergy::from_lead_couplings(Vector2::new(0.05, 0.01), Vector2::new(0.03, 0.02));
        assert!(is_anti_hermitian(&self_energy.retarded()));
        let advanced = self_energy.advanced();
        assert_eq!(advanced[(1, 1)].re, 0.);
        approx::assert_relative_eq!(advanced[(1, 1)].im, 0.015, epsilon = 1e-15);
    }
}

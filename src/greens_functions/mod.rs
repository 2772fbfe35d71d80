//! Green's functions of the dot-Majorana scattering region
//!
//! At each energy the retarded Green's function is
//!
//! `G^R(ω) = [(ω + iη) I - H(ω) - Σ^R]^{-1}`
//!
//! and the advanced Green's function is its Hermitian conjugate. The spectral function `A = i (G^R - G^A)` is
//! Hermitian with a non-negative diagonal for any causal `G^R`.
//!
//! The inversion uses the closed-form 2x2 kernel. When the matrix to be inverted is numerically singular the Green's
//! function is replaced by the zero matrix and the pair is flagged as degenerate; this is not an error and the
//! calling sweep continues.

use crate::{
    hamiltonian::Hamiltonian,
    self_energy::SelfEnergy,
    utilities::matrices::{
        conjugate_transpose, invert_2x2, is_anti_hermitian, is_hermitian, is_singular,
    },
};
use nalgebra::{Matrix2, RealField};
use num_complex::Complex;

type Dense<T> = Matrix2<Complex<T>>;

/// Methods to generate the Green's functions of a single energy from the system Hamiltonian
pub trait GreensFunctionMethods<T>: Sized
where
    T: Copy + RealField,
{
    /// The self-energy type associated with the Green's function
    type SelfEnergy;
    /// Construct the operator `(ω + iη) I - H(ω) - Σ^R` whose inverse is the retarded Green's function
    fn generate_inverse_retarded(
        energy: T,
        broadening: T,
        hamiltonian: &Hamiltonian<T>,
        retarded_self_energy: &Self::SelfEnergy,
    ) -> Self;
    /// Invert the operator from `generate_inverse_retarded`, giving the zero matrix if it is singular
    fn generate_retarded(inverse_retarded: &Self) -> Self;
    /// The advanced Green's function from the retarded Green's function
    fn generate_advanced(retarded: &Self) -> Self;
    /// The spectral function `i (G^R - G^A)`
    fn generate_spectral_function(retarded: &Self, advanced: &Self) -> Self;
}

impl<T> GreensFunctionMethods<T> for Matrix2<Complex<T>>
where
    T: Copy + RealField,
{
    type SelfEnergy = SelfEnergy<T>;

    fn generate_inverse_retarded(
        energy: T,
        broadening: T,
        hamiltonian: &Hamiltonian<T>,
        self_energy: &SelfEnergy<T>,
    ) -> Self {
        Matrix2::from_diagonal_element(Complex::new(energy, broadening))
            - hamiltonian.calculate_total(energy)
            - self_energy.retarded()
    }

    fn generate_retarded(inverse_retarded: &Self) -> Self {
        invert_2x2(inverse_retarded)
    }

    fn generate_advanced(retarded: &Self) -> Self {
        conjugate_transpose(retarded)
    }

    fn generate_spectral_function(retarded: &Self, advanced: &Self) -> Self {
        let imaginary_unit = Complex::new(T::zero(), T::one());
        (retarded - advanced).map(|element| imaginary_unit * element)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The retarded and advanced Green's functions at a single energy
pub struct GreensFunctionPair<T: Copy + RealField> {
    retarded: Matrix2<Complex<T>>,
    advanced: Matrix2<Complex<T>>,
    /// Whether the inversion was singular and the zero matrix was substituted
    degenerate: bool,
}

impl<T: Copy + RealField> GreensFunctionPair<T> {
    /// Calculate the Green's functions at `energy`
    pub fn new(
        energy: T,
        broadening: T,
        hamiltonian: &Hamiltonian<T>,
        self_energy: &SelfEnergy<T>,
    ) -> Self {
        debug_assert!(is_hermitian(&hamiltonian.calculate_total(energy)));
        let inverse = <Dense<T> as GreensFunctionMethods<T>>::generate_inverse_retarded(
            energy,
            broadening,
            hamiltonian,
            self_energy,
        );
        let pair = Self::from_inverse_retarded(&inverse);
        if pair.degenerate {
            tracing::debug!(
                energy = %energy,
                "Singular inverse Green's function, substituting a zero Green's function"
            );
        }
        pair
    }

    /// Invert `inverse_retarded` under the degenerate-matrix policy
    pub fn from_inverse_retarded(inverse_retarded: &Matrix2<Complex<T>>) -> Self {
        let retarded =
            <Dense<T> as GreensFunctionMethods<T>>::generate_retarded(inverse_retarded);
        let advanced = <Dense<T> as GreensFunctionMethods<T>>::generate_advanced(&retarded);
        debug_assert!(is_anti_hermitian(&(retarded - advanced)));
        Self {
            retarded,
            advanced,
            degenerate: is_singular(inverse_retarded),
        }
    }

    /// The retarded Green's function
    pub fn retarded(&self) -> &Matrix2<Complex<T>> {
        &self.retarded
    }

    /// The advanced Green's function
    pub fn advanced(&self) -> &Matrix2<Complex<T>> {
        &self.advanced
    }

    /// The spectral function `A = i (G^R - G^A)`
    pub fn spectral_function(&self) -> Matrix2<Complex<T>> {
        <Dense<T> as GreensFunctionMethods<T>>::generate_spectral_function(
            &self.retarded,
            &self.advanced,
        )
    }

    /// True if the zero matrix was substituted for a singular inversion
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

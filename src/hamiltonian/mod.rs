//! Hamiltonian module
//!
//! Creates the effective Hamiltonian of the scattering region for use in the NEGF calculation.
//!
//! The scattering region holds two levels, the quantum dot (index 0) and the effective Majorana mode (index 1):
//!
//! ```text
//! H(ω) = | ε_dot(ω)   t(φ) |
//!        | t(φ)       E_M  |
//! ```
//!
//! where `t(φ) = λ1 cos(φ/2) - λ2 sin(φ/2)` is the flux-dependent coupling between the dot and the Majorana mode.
//! The phase only enters through this real prefactor, so the Hamiltonian is real symmetric and Hermitian by
//! construction. The dot level is either pinned to the sample energy (`DotLevel::Resonant`) or fixed.
//!
//! A Hamiltonian is constructed through the `HamiltonianBuilder` from any type implementing `HamiltonianInfoDesk`:
//!
//! ```ignore
//! HamiltonianBuilder::default()
//!     .with_info_desk(&parameters)
//!     .build();
//! ```

use nalgebra::{Matrix2, RealField};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// The on-site energy of the quantum dot
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DotLevel<T> {
    /// The dot level follows the energy at which the Hamiltonian is evaluated, `ε_dot(ω) = ω`
    Resonant,
    /// The dot level is independent of energy
    Fixed(T),
}

impl<T: Copy + RealField> DotLevel<T> {
    /// The dot level at `energy`
    pub fn at(&self, energy: T) -> T {
        match self {
            DotLevel::Resonant => energy,
            DotLevel::Fixed(level) => *level,
        }
    }
}

/// The flux dependent coupling between the dot and the Majorana mode, `λ1 cos(φ/2) - λ2 sin(φ/2)`
pub fn effective_coupling<T: Copy + RealField>(flux_phase: T, couplings: [T; 2]) -> T {
    let half_phase = flux_phase / (T::one() + T::one());
    couplings[0] * half_phase.cos() - couplings[1] * half_phase.sin()
}

/// An InfoDesk trait providing all the necessary external information required to construct the Hamiltonian
pub trait HamiltonianInfoDesk<T: RealField> {
    /// The on-site energy of the quantum dot
    fn dot_level(&self) -> DotLevel<T>;
    /// The on-site energy of the Majorana mode `E_M`
    fn majorana_energy(&self) -> T;
    /// The magnetic flux phase `φ` in radians
    fn flux_phase(&self) -> T;
    /// The two dot-Majorana tunnelling amplitudes `[λ1, λ2]`
    fn majorana_couplings(&self) -> [T; 2];
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The effective two-level Hamiltonian
pub struct Hamiltonian<T: Copy + RealField> {
    /// The on-site energy of the dot
    dot_level: DotLevel<T>,
    /// The on-site energy of the Majorana mode
    majorana_energy: T,
    /// The real, symmetric, off-diagonal coupling `t(φ)`
    coupling: T,
}

impl<T: Copy + RealField> Hamiltonian<T> {
    /// The off-diagonal element `t(φ)`
    pub fn coupling(&self) -> T {
        self.coupling
    }

    /// Evaluates the Hamiltonian matrix at `energy`
    pub fn calculate_total(&self, energy: T) -> Matrix2<Complex<T>> {
        let coupling = Complex::from(self.coupling);
        Matrix2::new(
            Complex::from(self.dot_level.at(energy)),
            coupling,
            coupling,
            Complex::from(self.majorana_energy),
        )
    }
}

/// Builder for a Hamiltonian from an object implementing HamiltonianInfoDesk
pub struct HamiltonianBuilder<RefInfoDesk> {
    info_desk: RefInfoDesk,
}

impl Default for HamiltonianBuilder<()> {
    /// Initialize an empty instance of HamiltonianBuilder
    fn default() -> Self {
        Self { info_desk: () }
    }
}

impl<RefInfoDesk> HamiltonianBuilder<RefInfoDesk> {
    /// Attach the info desk
    pub fn with_info_desk<InfoDesk>(self, info_desk: &InfoDesk) -> HamiltonianBuilder<&InfoDesk> {
        HamiltonianBuilder { info_desk }
    }
}

impl<'a, InfoDesk> HamiltonianBuilder<&'a InfoDesk> {
    /// Builds an instance of `Hamiltonian` from the attached info desk
    pub fn build<T>(self) -> Hamiltonian<T>
    where
        T: Copy + RealField,
        InfoDesk: HamiltonianInfoDesk<T>,
    {
        Hamiltonian {
            dot_level: self.info_desk.dot_level(),
            majorana_energy: self.info_desk.majorana_energy(),
            coupling: effective_coupling(
                self.info_desk.flux_phase(),
                self.info_desk.majorana_couplings(),
            ),
        }
    }
}

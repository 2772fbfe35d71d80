//! Run parameters
//!
//! A `RunParameters` holds every scalar describing a single transport calculation. It is constructed once through
//! the validating `RunParametersBuilder`, whose defaults are the reference values of the model, and is then
//! shared immutably by every energy sample of the sweep. Quantities derived from the temperature are computed
//! on construction, so nothing downstream mutates run state.

use crate::{
    error::ParameterError,
    hamiltonian::{DotLevel, HamiltonianInfoDesk},
    self_energy::SelfEnergyInfoDesk,
    spectral::{EnergySpace, EnergySpaceBuilder, IntegrationRule},
    statistics::{bose_occupation, is_below_temperature_floor, PhononCoefficientSeries},
};
use nalgebra::RealField;

#[derive(Clone, Debug, PartialEq)]
/// The validated, immutable parameters of a single run
pub struct RunParameters<T: Copy + RealField> {
    flux_phase: T,
    temperature: T,
    majorana_energy: T,
    majorana_couplings: [T; 2],
    left_lead_coupling: T,
    right_lead_coupling: T,
    chemical_potential: T,
    phonon_coupling: T,
    phonon_energy: T,
    broadening: T,
    phonon_truncation_order: usize,
    number_of_energy_steps: usize,
    energy_step: T,
    dot_level: DotLevel<T>,
    inverse_temperature: Option<T>,
    thermal_phonon_occupation: T,
}

impl<T: Copy + RealField> RunParameters<T> {
    /// The magnetic flux phase `φ`
    pub fn flux_phase(&self) -> T {
        self.flux_phase
    }

    /// The equilibrium thermal energy `kT`
    pub fn temperature(&self) -> T {
        self.temperature
    }

    /// The dot chemical potential `μ`, shared by both leads
    pub fn chemical_potential(&self) -> T {
        self.chemical_potential
    }

    /// The electron-phonon coupling `λ0`
    pub fn phonon_coupling(&self) -> T {
        self.phonon_coupling
    }

    /// The phonon energy `Ω0`
    pub fn phonon_energy(&self) -> T {
        self.phonon_energy
    }

    /// The infinitesimal broadening `η`
    pub fn broadening(&self) -> T {
        self.broadening
    }

    /// The highest phonon order kept in the Franck-Condon series
    pub fn phonon_truncation_order(&self) -> usize {
        self.phonon_truncation_order
    }

    /// The number of steps `Nw` spanned by the energy grid
    pub fn number_of_energy_steps(&self) -> usize {
        self.number_of_energy_steps
    }

    /// The energy grid spacing `dω`
    pub fn energy_step(&self) -> T {
        self.energy_step
    }

    /// `1 / kT`, or `None` when the temperature is below the zero temperature floor
    pub fn inverse_temperature(&self) -> Option<T> {
        self.inverse_temperature
    }

    /// The Bose occupation of the phonon mode at the run temperature
    pub fn thermal_phonon_occupation(&self) -> T {
        self.thermal_phonon_occupation
    }

    /// The Franck-Condon weights for this run
    pub fn phonon_series(&self) -> PhononCoefficientSeries<T> {
        PhononCoefficientSeries::new(
            self.phonon_truncation_order,
            self.phonon_coupling,
            self.phonon_energy,
        )
    }

    /// The energy grid described by this run
    pub fn energy_space(&self, integration_rule: IntegrationRule) -> Result<EnergySpace<T>, ParameterError> {
        EnergySpaceBuilder::new()
            .with_number_of_steps(self.number_of_energy_steps)
            .with_step(self.energy_step)
            .with_integration_rule(integration_rule)
            .build()
    }
}

impl<T: Copy + RealField> HamiltonianInfoDesk<T> for RunParameters<T> {
    fn dot_level(&self) -> DotLevel<T> {
        self.dot_level
    }

    fn majorana_energy(&self) -> T {
        self.majorana_energy
    }

    fn flux_phase(&self) -> T {
        self.flux_phase
    }

    fn majorana_couplings(&self) -> [T; 2] {
        self.majorana_couplings
    }
}

impl<T: Copy + RealField> SelfEnergyInfoDesk<T> for RunParameters<T> {
    fn left_lead_coupling(&self) -> T {
        self.left_lead_coupling
    }

    fn right_lead_coupling(&self) -> T {
        self.right_lead_coupling
    }
}

#[derive(Clone, Debug)]
/// Builder for `RunParameters`, initialised with the reference values
pub struct RunParametersBuilder<T> {
    flux_phase: T,
    temperature: T,
    majorana_energy: T,
    majorana_couplings: [T; 2],
    left_lead_coupling: T,
    right_lead_coupling: T,
    chemical_potential: T,
    phonon_coupling: T,
    phonon_energy: T,
    broadening: T,
    phonon_truncation_order: usize,
    number_of_energy_steps: usize,
    energy_step: T,
    dot_level: DotLevel<T>,
}

impl<T: Copy + RealField> Default for RunParametersBuilder<T> {
    fn default() -> Self {
        Self {
            flux_phase: T::pi(),
            temperature: nalgebra::convert(0.1),
            majorana_energy: T::zero(),
            majorana_couplings: [T::one(), T::one()],
            left_lead_coupling: nalgebra::convert(0.05),
            right_lead_coupling: nalgebra::convert(0.05),
            chemical_potential: T::zero(),
            phonon_coupling: T::zero(),
            phonon_energy: T::one(),
            broadening: nalgebra::convert(1e-3),
            phonon_truncation_order: 10,
            number_of_energy_steps: 4000,
            energy_step: nalgebra::convert(1e-3),
            dot_level: DotLevel::Resonant,
        }
    }
}

impl<T: Copy + RealField> RunParametersBuilder<T> {
    /// A builder holding the reference parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flux phase `φ` in radians
    pub fn with_flux_phase(mut self, flux_phase: T) -> Self {
        self.flux_phase = flux_phase;
        self
    }

    /// Set the equilibrium thermal energy `kT`
    pub fn with_temperature(mut self, temperature: T) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the Majorana on-site energy `E_M`
    pub fn with_majorana_energy(mut self, majorana_energy: T) -> Self {
        self.majorana_energy = majorana_energy;
        self
    }

    /// Set both dot-Majorana tunnelling amplitudes `λ1`, `λ2`
    pub fn with_majorana_couplings(mut self, first: T, second: T) -> Self {
        self.majorana_couplings = [first, second];
        self
    }

    /// Set the lead couplings `Γ_L`, `Γ_R`
    pub fn with_lead_couplings(mut self, left: T, right: T) -> Self {
        self.left_lead_coupling = left;
        self.right_lead_coupling = right;
        self
    }

    /// Set the chemical potential `μ`
    pub fn with_chemical_potential(mut self, chemical_potential: T) -> Self {
        self.chemical_potential = chemical_potential;
        self
    }

    /// Set the electron-phonon coupling `λ0`
    pub fn with_phonon_coupling(mut self, phonon_coupling: T) -> Self {
        self.phonon_coupling = phonon_coupling;
        self
    }

    /// Set the phonon energy `Ω0`
    pub fn with_phonon_energy(mut self, phonon_energy: T) -> Self {
        self.phonon_energy = phonon_energy;
        self
    }

    /// Set the broadening `η`
    pub fn with_broadening(mut self, broadening: T) -> Self {
        self.broadening = broadening;
        self
    }

    /// Set the highest phonon order retained
    pub fn with_phonon_truncation_order(mut self, phonon_truncation_order: usize) -> Self {
        self.phonon_truncation_order = phonon_truncation_order;
        self
    }

    /// Set the number of grid steps `Nw` and the spacing `dω`
    pub fn with_energy_grid(mut self, number_of_energy_steps: usize, energy_step: T) -> Self {
        self.number_of_energy_steps = number_of_energy_steps;
        self.energy_step = energy_step;
        self
    }

    /// Set the dot level mode
    pub fn with_dot_level(mut self, dot_level: DotLevel<T>) -> Self {
        self.dot_level = dot_level;
        self
    }

    /// Validate the parameters and compute the derived quantities
    pub fn build(self) -> Result<RunParameters<T>, ParameterError> {
        let dot_level = match self.dot_level {
            DotLevel::Resonant => T::zero(),
            DotLevel::Fixed(level) => level,
        };
        for (name, value) in [
            ("flux_phase", self.flux_phase),
            ("temperature", self.temperature),
            ("majorana_energy", self.majorana_energy),
            ("lambda1", self.majorana_couplings[0]),
            ("lambda2", self.majorana_couplings[1]),
            ("gamma_left", self.left_lead_coupling),
            ("gamma_right", self.right_lead_coupling),
            ("chemical_potential", self.chemical_potential),
            ("phonon_coupling", self.phonon_coupling),
            ("phonon_energy", self.phonon_energy),
            ("broadening", self.broadening),
            ("energy_step", self.energy_step),
            ("dot_level", dot_level),
        ] {
            finite(name, value)?;
        }
        for (name, value) in [
            ("temperature", self.temperature),
            ("gamma_left", self.left_lead_coupling),
            ("gamma_right", self.right_lead_coupling),
            ("broadening", self.broadening),
        ] {
            non_negative(name, value)?;
        }
        positive("phonon_energy", self.phonon_energy)?;
        positive("energy_step", self.energy_step)?;
        if self.number_of_energy_steps == 0 || self.number_of_energy_steps % 2 != 0 {
            return Err(ParameterError::OddGrid(self.number_of_energy_steps));
        }

        let inverse_temperature = if is_below_temperature_floor(self.temperature) {
            None
        } else {
            Some(T::one() / self.temperature)
        };

        Ok(RunParameters {
            flux_phase: self.flux_phase,
            temperature: self.temperature,
            majorana_energy: self.majorana_energy,
            majorana_couplings: self.majorana_couplings,
            left_lead_coupling: self.left_lead_coupling,
            right_lead_coupling: self.right_lead_coupling,
            chemical_potential: self.chemical_potential,
            phonon_coupling: self.phonon_coupling,
            phonon_energy: self.phonon_energy,
            broadening: self.broadening,
            phonon_truncation_order: self.phonon_truncation_order,
            number_of_energy_steps: self.number_of_energy_steps,
            energy_step: self.energy_step,
            dot_level: self.dot_level,
            inverse_temperature,
            thermal_phonon_occupation: bose_occupation(self.phonon_energy, self.temperature),
        })
    }
}

fn finite<T: Copy + RealField>(name: &'static str, value: T) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite {
            name,
            value: value.to_string(),
        })
    }
}

fn non_negative<T: Copy + RealField>(name: &'static str, value: T) -> Result<(), ParameterError> {
    if value >= T::zero() {
        Ok(())
    } else {
        Err(ParameterError::Negative {
            name,
            value: value.to_string(),
        })
    }
}

fn positive<T: Copy + RealField>(name: &'static str, value: T) -> Result<(), ParameterError> {
    if value > T::zero() {
        Ok(())
    } else {
        Err(ParameterError::NonPositive {
            name,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::RunParametersBuilder;
    use crate::error::ParameterError;
    use crate::hamiltonian::{DotLevel, HamiltonianInfoDesk};
    use crate::self_energy::SelfEnergyInfoDesk;
    use crate::spectral::IntegrationRule;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_the_reference_values() {
        let parameters = RunParametersBuilder::<f64>::new().build().unwrap();
        assert_eq!(parameters.flux_phase(), std::f64::consts::PI);
        assert_eq!(parameters.temperature(), 0.1);
        assert_eq!(parameters.majorana_energy(), 0.);
        assert_eq!(parameters.majorana_couplings(), [1., 1.]);
        assert_eq!(parameters.left_lead_coupling(), 0.05);
        assert_eq!(parameters.right_lead_coupling(), 0.05);
        assert_eq!(parameters.chemical_potential(), 0.);
        assert_eq!(parameters.phonon_coupling(), 0.);
        assert_eq!(parameters.phonon_energy(), 1.);
        assert_eq!(parameters.broadening(), 1e-3);
        assert_eq!(parameters.phonon_truncation_order(), 10);
        assert_eq!(parameters.number_of_energy_steps(), 4000);
        assert_eq!(parameters.energy_step(), 1e-3);
        assert_eq!(parameters.dot_level(), DotLevel::Resonant);
    }

    #[test]
    fn derived_thermal_quantities() {
        let parameters = RunParametersBuilder::<f64>::new().build().unwrap();
        assert_relative_eq!(parameters.inverse_temperature().unwrap(), 10., epsilon = 1e-12);
        assert_relative_eq!(
            parameters.thermal_phonon_occupation(),
            1. / (10f64.exp() - 1.),
            max_relative = 1e-12
        );

        let cold = RunParametersBuilder::<f64>::new()
            .with_temperature(0.)
            .build()
            .unwrap();
        assert!(cold.inverse_temperature().is_none());
        assert_eq!(cold.thermal_phonon_occupation(), 0.);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let result = RunParametersBuilder::<f64>::new()
            .with_flux_phase(f64::NAN)
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::NonFinite {
                name: "flux_phase",
                ..
            })
        ));
    }

    #[test]
    fn negative_couplings_and_temperatures_are_rejected() {
        let result = RunParametersBuilder::<f64>::new()
            .with_lead_couplings(0.05, -0.05)
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::Negative {
                name: "gamma_right",
                ..
            })
        ));
        let result = RunParametersBuilder::<f64>::new()
            .with_temperature(-1.)
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::Negative {
                name: "temperature",
                ..
            })
        ));
    }

    #[test]
    fn phonon_energy_must_be_positive() {
        let result = RunParametersBuilder::<f64>::new()
            .with_phonon_energy(0.)
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::NonPositive {
                name: "phonon_energy",
                ..
            })
        ));
    }

    #[test]
    fn odd_grids_are_rejected() {
        let result = RunParametersBuilder::<f64>::new()
            .with_energy_grid(11, 1e-3)
            .build();
        assert_eq!(result.unwrap_err(), ParameterError::OddGrid(11));
    }

    #[test]
    fn energy_space_follows_the_grid_parameters() {
        let parameters = RunParametersBuilder::<f64>::new()
            .with_energy_grid(100, 1e-2)
            .build()
            .unwrap();
        let space = parameters
            .energy_space(IntegrationRule::Trapezium)
            .unwrap();
        assert_eq!(space.num_points(), 101);
        assert_relative_eq!(space.minimum_energy(), -0.5, epsilon = 1e-12);
        assert_relative_eq!(space.maximum_energy(), 0.5, epsilon = 1e-12);
    }
}

use super::{IntegratedObservables, ObservableSample, PostProcessor};
use crate::{
    constants::{ELECTRON_CHARGE, PLANCK},
    greens_functions::GreensFunctionPair,
    self_energy::SelfEnergy,
    spectral::EnergySpace,
    statistics::fermi_occupation,
};
use itertools::iproduct;
use nalgebra::RealField;

/// Reduction of Green's functions into observables
pub trait PostProcess<T: Copy + RealField> {
    /// Compute the observables at `energy` from the Green's functions evaluated there
    fn sample(
        &self,
        energy: T,
        greens_functions: &GreensFunctionPair<T>,
        self_energy: &SelfEnergy<T>,
    ) -> ObservableSample<T>;

    /// Integrate samples, ordered as the points of `energy_space`, over the grid
    fn integrate(
        &self,
        samples: &[ObservableSample<T>],
        energy_space: &EnergySpace<T>,
    ) -> IntegratedObservables<T>;
}

impl<'a, T: Copy + RealField> PostProcess<T> for PostProcessor<'a, T> {
    fn sample(
        &self,
        energy: T,
        greens_functions: &GreensFunctionPair<T>,
        self_energy: &SelfEnergy<T>,
    ) -> ObservableSample<T> {
        let retarded = greens_functions.retarded();
        let left = self_energy.left_coupling();
        let right = self_energy.right_coupling();

        let transmission = iproduct!(0..2, 0..2).fold(T::zero(), |sum, (j, k)| {
            sum + left[j] * retarded[(j, k)].norm_sqr() * right[k]
        });

        // Both leads are held at the chemical potential and temperature of the dot
        let chemical_potential = self.info_desk.chemical_potential();
        let temperature = self.info_desk.temperature();
        let left_occupation = fermi_occupation(energy, chemical_potential, temperature);
        let right_occupation = fermi_occupation(energy, chemical_potential, temperature);

        let charge: T = nalgebra::convert(ELECTRON_CHARGE);
        let planck: T = nalgebra::convert(PLANCK);
        let spectral_function = greens_functions.spectral_function();

        ObservableSample {
            energy,
            density_of_states: -retarded[(0, 0)].im / T::pi(),
            transmission,
            conductance: charge * charge / planck * transmission,
            current: charge / planck * transmission * (left_occupation - right_occupation),
            g_tilde: retarded[(0, 0)].norm_sqr(),
            spectral_dot: spectral_function[(0, 0)].re,
            spectral_majorana: spectral_function[(1, 1)].re,
        }
    }

    fn integrate(
        &self,
        samples: &[ObservableSample<T>],
        energy_space: &EnergySpace<T>,
    ) -> IntegratedObservables<T> {
        let integrate_field = |field: fn(&ObservableSample<T>) -> T| {
            energy_space.integrate(&samples.iter().map(field).collect::<Vec<_>>())
        };
        let minimum = |field: fn(&ObservableSample<T>) -> T| {
            samples
                .iter()
                .map(field)
                .reduce(|a, b| a.min(b))
                .unwrap_or_else(T::zero)
        };
        IntegratedObservables {
            density_of_states: integrate_field(|sample| sample.density_of_states),
            transmission: integrate_field(|sample| sample.transmission),
            conductance: integrate_field(|sample| sample.conductance),
            current: integrate_field(|sample| sample.current),
            minimum_spectral_dot: minimum(|sample| sample.spectral_dot),
            minimum_spectral_majorana: minimum(|sample| sample.spectral_majorana),
        }
    }
}

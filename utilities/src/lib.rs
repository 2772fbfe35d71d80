use rand::Rng;
use transporter_majorana::{
    hamiltonian::DotLevel,
    parameters::{RunParameters, RunParametersBuilder},
    spectral::{EnergySpace, IntegrationRule},
};

/// The reference parameters on a grid of `number_of_steps` steps
pub fn reference_parameters(number_of_steps: usize) -> RunParameters<f64> {
    RunParametersBuilder::new()
        .with_energy_grid(number_of_steps, 1e-3)
        .build()
        .expect("Reference parameters are valid")
}

/// Parameters with randomised tunable scalars and a randomly fixed or resonant dot level
pub fn random_parameters<R: Rng>(rng: &mut R, number_of_steps: usize) -> RunParameters<f64> {
    let dot_level = if rng.gen_bool(0.5) {
        DotLevel::Resonant
    } else {
        DotLevel::Fixed(rng.gen_range(-0.1..0.1))
    };
    RunParametersBuilder::new()
        .with_flux_phase(rng.gen_range(0.0..std::f64::consts::TAU))
        .with_temperature(rng.gen_range(0.0..1.0))
        .with_majorana_energy(rng.gen_range(-0.1..0.1))
        .with_majorana_couplings(rng.gen_range(0.0..2.0), rng.gen_range(0.0..2.0))
        .with_lead_couplings(rng.gen_range(0.0..0.1), rng.gen_range(0.0..0.1))
        .with_phonon_coupling(rng.gen_range(0.0..1.0))
        .with_dot_level(dot_level)
        .with_energy_grid(number_of_steps, 1e-3)
        .build()
        .expect("Random parameters are drawn from valid ranges")
}

pub fn construct_energy_space(parameters: &RunParameters<f64>) -> EnergySpace<f64> {
    parameters
        .energy_space(IntegrationRule::Trapezium)
        .expect("Grid parameters have been validated")
}

//! # Sweep
//!
//! The energy sweep drives the transport calculation. The Hamiltonian, self-energy and phonon series do not depend
//! on the sample energy, so they are constructed once. Each grid point is then independent: the Green's functions
//! are evaluated and reduced to observables in parallel over the grid, and the results are collected in the order
//! of the energy index so they can be handed to a `ResultSink` in strictly increasing energy.

use crate::{
    greens_functions::GreensFunctionPair,
    hamiltonian::{Hamiltonian, HamiltonianBuilder},
    parameters::RunParameters,
    postprocessor::{
        IntegratedObservables, ObservableSample, PostProcess, PostProcessor, PostProcessorBuilder,
        ResultSink,
    },
    self_energy::SelfEnergy,
    spectral::EnergySpace,
    statistics::PhononCoefficientSeries,
};
use console::Term;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use nalgebra::RealField;
use rayon::prelude::*;

/// A progress bar on stdout sized for a sweep over `number_of_points` energies
pub fn progress_bar(number_of_points: usize) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{prefix:.bold.dim} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let bar = ProgressBar::with_draw_target(
        number_of_points as u64,
        ProgressDrawTarget::term(Term::stdout(), 60),
    );
    bar.set_style(style);
    bar.set_message("Energy sweep");
    bar
}

/// Builder for a `TransportSweep`
pub struct SweepBuilder<RefParameters, RefEnergySpace> {
    parameters: RefParameters,
    energy_space: RefEnergySpace,
}

impl SweepBuilder<(), ()> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        Self {
            parameters: (),
            energy_space: (),
        }
    }
}

impl Default for SweepBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefParameters, RefEnergySpace> SweepBuilder<RefParameters, RefEnergySpace> {
    /// Attach the run parameters
    pub fn with_parameters<Parameters>(
        self,
        parameters: &Parameters,
    ) -> SweepBuilder<&Parameters, RefEnergySpace> {
        SweepBuilder {
            parameters,
            energy_space: self.energy_space,
        }
    }

    /// Attach the energy grid
    pub fn with_energy_space<Energy>(
        self,
        energy_space: &Energy,
    ) -> SweepBuilder<RefParameters, &Energy> {
        SweepBuilder {
            parameters: self.parameters,
            energy_space,
        }
    }
}

impl<'a, T> SweepBuilder<&'a RunParameters<T>, &'a EnergySpace<T>>
where
    T: Copy + RealField,
{
    /// Assemble the energy independent parts of the calculation
    pub fn build(self) -> TransportSweep<'a, T> {
        TransportSweep {
            parameters: self.parameters,
            energy_space: self.energy_space,
            hamiltonian: HamiltonianBuilder::default()
                .with_info_desk(self.parameters)
                .build(),
            self_energy: SelfEnergy::from_info_desk(self.parameters),
            phonons: self.parameters.phonon_series(),
            postprocessor: PostProcessorBuilder::new()
                .with_info_desk(self.parameters)
                .build(),
        }
    }
}

/// A transport calculation over an energy grid
pub struct TransportSweep<'a, T: Copy + RealField> {
    parameters: &'a RunParameters<T>,
    energy_space: &'a EnergySpace<T>,
    hamiltonian: Hamiltonian<T>,
    self_energy: SelfEnergy<T>,
    phonons: PhononCoefficientSeries<T>,
    postprocessor: PostProcessor<'a, T>,
}

#[derive(Clone, Debug)]
/// The ordered output of a sweep
pub struct SweepResult<T> {
    /// One sample per grid point, in increasing energy
    pub samples: Vec<ObservableSample<T>>,
    /// The Franck-Condon weights of the run
    pub phonons: PhononCoefficientSeries<T>,
    /// The number of grid points at which the inversion was singular
    pub degenerate_samples: usize,
    /// Observables integrated over the grid
    pub integrated: IntegratedObservables<T>,
}

impl<T: Copy> SweepResult<T> {
    /// Hand every sample, in order, to `sink`
    pub fn emit<Sink: ResultSink<T>>(&self, sink: &mut Sink) -> Result<(), Sink::Error> {
        for sample in self.samples.iter() {
            sink.accept(sample, &self.phonons)?;
        }
        sink.finish()
    }
}

impl<'a, T> TransportSweep<'a, T>
where
    T: Copy + RealField + Send + Sync,
{
    /// The effective Hamiltonian used for every sample
    pub fn hamiltonian(&self) -> &Hamiltonian<T> {
        &self.hamiltonian
    }

    /// Evaluate the observables at grid point `index`, and whether the inversion there was singular
    pub fn compute_sample(&self, index: usize) -> (ObservableSample<T>, bool) {
        let energy = self.energy_space.energy_at(index);
        let greens_functions = GreensFunctionPair::new(
            energy,
            self.parameters.broadening(),
            &self.hamiltonian,
            &self.self_energy,
        );
        (
            self.postprocessor
                .sample(energy, &greens_functions, &self.self_energy),
            greens_functions.is_degenerate(),
        )
    }

    /// Run the sweep in parallel without displaying progress
    pub fn run(&self) -> SweepResult<T> {
        self.run_with_progress(ProgressBar::hidden())
    }

    /// Run the sweep in parallel, advancing `progress` once per grid point
    #[tracing::instrument(name = "Energy sweep", skip_all)]
    pub fn run_with_progress(&self, progress: ProgressBar) -> SweepResult<T> {
        tracing::info!(
            points = self.energy_space.num_points(),
            "Starting sweep from {} to {}",
            self.energy_space.minimum_energy(),
            self.energy_space.maximum_energy()
        );
        let computed = (0..self.energy_space.num_points())
            .into_par_iter()
            .progress_with(progress.clone())
            .map(|index| self.compute_sample(index))
            .collect::<Vec<_>>();
        progress.finish_and_clear();
        self.assemble(computed)
    }

    /// Run the sweep on the calling thread
    pub fn run_sequential(&self) -> SweepResult<T> {
        let computed = (0..self.energy_space.num_points())
            .map(|index| self.compute_sample(index))
            .collect::<Vec<_>>();
        self.assemble(computed)
    }

    fn assemble(&self, computed: Vec<(ObservableSample<T>, bool)>) -> SweepResult<T> {
        let degenerate_samples = computed.iter().filter(|(_, degenerate)| *degenerate).count();
        let samples = computed
            .into_iter()
            .map(|(sample, _)| sample)
            .collect::<Vec<_>>();
        let integrated = self.postprocessor.integrate(&samples, self.energy_space);
        if degenerate_samples > 0 {
            tracing::warn!("{degenerate_samples} samples had a singular inverse Green's function");
        }
        tracing::info!(
            integrated_dos = %integrated.density_of_states,
            integrated_conductance = %integrated.conductance,
            "Sweep complete"
        );
        SweepResult {
            samples,
            phonons: self.phonons.clone(),
            degenerate_samples,
            integrated,
        }
    }
}

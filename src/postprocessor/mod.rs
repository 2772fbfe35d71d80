//! # PostProcessor
//!
//! Reduces the Green's functions at each energy into the transport observables, and integrates the sampled
//! observables over the energy grid.
mod observables;
mod postprocess;
mod sink;

pub use observables::{IntegratedObservables, ObservableSample};
pub use postprocess::PostProcess;
pub use sink::{CollectingSink, ResultSink};

use crate::parameters::RunParameters;
use nalgebra::RealField;

/// Builder for a `PostProcessor`
pub struct PostProcessorBuilder<RefInfoDesk> {
    info_desk: RefInfoDesk,
}

#[derive(Clone, Copy, Debug)]
/// Computes observables from a `GreensFunctionPair` using the occupation of the leads in `RunParameters`
pub struct PostProcessor<'a, T: Copy + RealField> {
    info_desk: &'a RunParameters<T>,
}

impl PostProcessorBuilder<()> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        PostProcessorBuilder { info_desk: () }
    }
}

impl Default for PostProcessorBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefInfoDesk> PostProcessorBuilder<RefInfoDesk> {
    /// Attach the run parameters
    pub fn with_info_desk<InfoDesk>(self, info_desk: &InfoDesk) -> PostProcessorBuilder<&InfoDesk> {
        PostProcessorBuilder { info_desk }
    }
}

impl<'a, T: Copy + RealField> PostProcessorBuilder<&'a RunParameters<T>> {
    /// Build the `PostProcessor`
    pub fn build(self) -> PostProcessor<'a, T> {
        PostProcessor {
            info_desk: self.info_desk,
        }
    }
}

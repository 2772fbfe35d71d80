use super::ObservableSample;
use crate::statistics::PhononCoefficientSeries;

/// A consumer of the ordered output of an energy sweep
///
/// Samples arrive in strictly increasing energy. The phonon series is the same for every sample of a run and is
/// passed alongside each one so that sinks writing per-energy tables can replicate it.
pub trait ResultSink<T> {
    /// The error raised when a sample cannot be recorded
    type Error;

    /// Record a single sample
    fn accept(
        &mut self,
        sample: &ObservableSample<T>,
        phonons: &PhononCoefficientSeries<T>,
    ) -> Result<(), Self::Error>;

    /// Called once after the last sample
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
/// A sink which holds the sweep in memory
pub struct CollectingSink<T> {
    /// The samples in the order received
    pub samples: Vec<ObservableSample<T>>,
    /// Rows of `(ω, n, L_n)`, one for each phonon order of each sample
    pub phonon_rows: Vec<(T, usize, T)>,
    /// Whether `finish` has been called
    pub finished: bool,
}

impl<T: Copy> ResultSink<T> for CollectingSink<T> {
    type Error = std::convert::Infallible;

    fn accept(
        &mut self,
        sample: &ObservableSample<T>,
        phonons: &PhononCoefficientSeries<T>,
    ) -> Result<(), Self::Error> {
        self.samples.push(*sample);
        self.phonon_rows.extend(
            phonons
                .as_slice()
                .iter()
                .enumerate()
                .map(|(n, &weight)| (sample.energy, n, weight)),
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.finished = true;
        Ok(())
    }
}

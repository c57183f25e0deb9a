//! Sample-by-sample generator trait.
//!
//! Generators such as [`WhiteNoise`](crate::WhiteNoise) and
//! [`SineOscillator`](crate::SineOscillator) produce samples one at a time;
//! [`TimeSeries::from_signal`](crate::TimeSeries::from_signal) collects a
//! fixed number of them into a whole series.

/// Common interface for anything that can generate samples.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient batch processing.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

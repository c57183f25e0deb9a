//! Gaussian white noise.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::core::{Signal, TimeSeries};
use crate::error::{Error, Result};

/// A white noise generator.
///
/// White noise has equal power across all frequencies. Each sample is an
/// independent draw from a zero-mean Gaussian with standard deviation
/// `scale`. The random number generator is owned by the caller's choice of
/// `R`; two generators seeded identically yield identical samples.
pub struct WhiteNoise<R: Rng> {
    /// Zero-mean normal distribution with the requested deviation
    distribution: Normal<f64>,
    /// Random number generator
    rng: R,
}

impl<R: Rng> WhiteNoise<R> {
    /// Creates a new white noise generator.
    ///
    /// # Arguments
    ///
    /// * `scale` - Standard deviation of each sample
    /// * `rng` - Random number generator to draw from
    ///
    /// # Errors
    ///
    /// `InvalidScale` if `scale` is negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use noisemaze::{Signal, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = WhiteNoise::new(0.1, rng).unwrap();
    /// let sample = noise.next_sample();
    /// assert!(sample.is_finite());
    /// ```
    pub fn new(scale: f64, rng: R) -> Result<Self> {
        if !(scale.is_finite() && scale >= 0.0) {
            return Err(Error::InvalidScale(scale));
        }
        let distribution = Normal::new(0.0, scale).map_err(|_| Error::InvalidScale(scale))?;
        Ok(Self { distribution, rng })
    }

    /// Standard deviation of the generated samples.
    pub fn scale(&self) -> f64 {
        self.distribution.std_dev()
    }

    /// Gives the generator back, e.g. to keep drawing from the same stream.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng> Signal for WhiteNoise<R> {
    fn next_sample(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }
}

/// Draws `round(sample_rate * duration)` Gaussian samples into a series.
///
/// The generator is borrowed, so consecutive calls continue the same random
/// stream; reseeding reproduces the output bit for bit.
///
/// # Errors
///
/// `InvalidRate` for a non-positive sample rate, `InvalidLength` if the
/// series would be empty, `InvalidScale` for a negative or non-finite scale.
///
/// # Examples
///
/// ```
/// use noisemaze::white_noise;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let a = white_noise(1000.0, 2.0, 0.1, &mut StdRng::seed_from_u64(7)).unwrap();
/// let b = white_noise(1000.0, 2.0, 0.1, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(a.len(), 2000);
/// assert_eq!(a, b);
/// ```
pub fn white_noise<R: Rng + ?Sized>(
    sample_rate: f64,
    duration: f64,
    scale: f64,
    rng: &mut R,
) -> Result<TimeSeries> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(Error::InvalidRate(format!(
            "sample rate must be positive and finite, got {sample_rate}"
        )));
    }
    let n_samples = (sample_rate * duration).round();
    if !(n_samples.is_finite() && n_samples >= 1.0) {
        return Err(Error::InvalidLength(format!(
            "{duration} s at {sample_rate} Hz gives no samples"
        )));
    }
    let n_samples = n_samples as usize;

    debug!("white noise: {n_samples} samples at {sample_rate} Hz, scale {scale}");
    let mut noise = WhiteNoise::new(scale, rng)?;
    TimeSeries::from_signal(&mut noise, sample_rate, n_samples)
}

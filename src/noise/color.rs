//! Spectral coloring of noise.

use log::debug;
use rand::Rng;

use super::white_noise;
use crate::core::TimeSeries;
use crate::error::Result;
use crate::spectral::{RedNoise, SpectralTransform, WeightFunction};

/// Reshapes the spectrum of `noise` by `weight`.
///
/// The series is transformed, every bin is multiplied by
/// `weight(frequency)`, and the result is transformed back. Length, rate
/// and start time are preserved.
///
/// # Examples
///
/// ```
/// use noisemaze::{RedNoise, color, white_noise};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let white = white_noise(1000.0, 1.0, 1.0, &mut rng).unwrap();
/// let red = color(&white, &RedNoise::default()).unwrap();
/// assert_eq!(red.len(), white.len());
/// ```
pub fn color<W: WeightFunction + ?Sized>(noise: &TimeSeries, weight: &W) -> Result<TimeSeries> {
    let mut transform = SpectralTransform::new();
    let spectrum = transform.forward(noise)?;
    debug!("coloring {} bins", spectrum.len());
    transform.inverse(&spectrum.weighted(weight))
}

/// White noise colored with a [`RedNoise`] shape in one step.
pub fn red_noise<R: Rng + ?Sized>(
    sample_rate: f64,
    duration: f64,
    scale: f64,
    shape: &RedNoise,
    rng: &mut R,
) -> Result<TimeSeries> {
    color(&white_noise(sample_rate, duration, scale, rng)?, shape)
}

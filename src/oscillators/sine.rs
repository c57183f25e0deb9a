//! Sine wave oscillator and whole-series sine builder.

use std::f64::consts::PI;

use crate::audio::apply_taper;
use crate::core::{Signal, TimeSeries};
use crate::error::{Error, Result};

/// Taper fraction applied by [`sine_wave`] when tapering is requested.
const SINE_TAPER_FRACTION: f64 = 0.1;

/// A sine wave oscillator.
///
/// Generates `amplitude * sin(2π f t)` starting at phase zero and keeps
/// phase continuity across calls to `next_sample()`.
pub struct SineOscillator {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
    sample_rate: f64,
    amplitude: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `amplitude` - Peak amplitude
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use noisemaze::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(440.0, 2.0, 44100.0);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, amplitude: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / sample_rate,
            sample_rate,
            amplitude,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.phase_increment * self.sample_rate
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = self.amplitude * (self.phase * 2.0 * PI).sin();

        // Increment phase and wrap to [0.0, 1.0)
        self.phase += self.phase_increment;
        self.phase -= self.phase.floor();

        sample
    }
}

/// Builds a sinusoid of `duration` seconds as a series starting at t = 0.
///
/// When `taper` is set and the amplitude is non-zero, a Tukey taper softens
/// both ends so the tone fades in and out. The taper always spans a fixed
/// 10% of the series (5% per end); it does not stop the fade at the nearest
/// local extremum of the waveform, so a tone that is long relative to the
/// taper loses some amplitude in its first and last few cycles.
///
/// # Errors
///
/// `InvalidRate` for a non-positive sample rate, `InvalidLength` if the
/// series would be empty.
pub fn sine_wave(
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    duration: f64,
    taper: bool,
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
    let mut osc = SineOscillator::new(frequency, amplitude, sample_rate);
    let ts = TimeSeries::from_signal(&mut osc, sample_rate, n_samples as usize)?;
    if taper && amplitude != 0.0 {
        ts.with_values(apply_taper(ts.values(), SINE_TAPER_FRACTION))
    } else {
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillator_creation() {
        let osc = SineOscillator::new(440.0, 1.0, 44100.0);
        assert!((osc.frequency() - 440.0).abs() < 1e-9);
        assert_eq!(osc.amplitude(), 1.0);
    }

    #[test]
    fn test_sample_range() {
        let mut osc = SineOscillator::new(440.0, 3.0, 44100.0);
        for _ in 0..44100 {
            let sample = osc.next_sample();
            assert!((-3.0..=3.0).contains(&sample));
        }
    }

    #[test]
    fn test_phase_wrapping() {
        let mut osc = SineOscillator::new(1000.0, 1.0, 44100.0);
        for _ in 0..100000 {
            osc.next_sample();
        }
        assert!(osc.phase >= 0.0 && osc.phase < 1.0);
    }

    #[test]
    fn test_sine_wave_matches_formula() {
        let ts = sine_wave(5.0, 2.0, 100.0, 1.0, false).unwrap();
        assert_eq!(ts.len(), 100);
        for (i, &v) in ts.values().iter().enumerate() {
            let expected = 2.0 * (2.0 * PI * 5.0 * i as f64 / 100.0).sin();
            assert!((v - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tapered_sine_fades() {
        let ts = sine_wave(50.0, 1.0, 1000.0, 1.0, true).unwrap();
        let plain = sine_wave(50.0, 1.0, 1000.0, 1.0, false).unwrap();
        assert!(ts.values()[1].abs() < plain.values()[1].abs());
        assert_eq!(ts.values()[500], plain.values()[500]);
        // Fade covers 5% at each end regardless of where the waveform peaks
        assert_eq!(&ts.values()[50..950], &plain.values()[50..950]);
        assert!(ts.values()[49].abs() <= plain.values()[49].abs());
        assert!(ts.values()[999].abs() < 1e-12);
    }

    #[test]
    fn test_sine_wave_rejects_empty() {
        assert!(matches!(
            sine_wave(5.0, 1.0, 100.0, 0.0, false),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            sine_wave(5.0, 1.0, -1.0, 1.0, false),
            Err(Error::InvalidRate(_))
        ));
    }
}

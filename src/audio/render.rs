//! Conversion of a time series into 16-bit PCM samples.

use log::debug;

use super::window::{DEFAULT_TAPER_FRACTION, apply_taper};
use crate::core::TimeSeries;
use crate::error::{Error, Result};

/// Fraction of the int16 range used by the loudest sample.
pub const DEFAULT_HEADROOM: f64 = 0.9;

/// Mono 16-bit audio ready for a PCM container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl RenderedAudio {
    /// Largest absolute sample value.
    pub fn peak(&self) -> i32 {
        self.samples
            .iter()
            .map(|&s| i32::from(s).abs())
            .max()
            .unwrap_or(0)
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Converts the samples back into a series scaled to [-1, 1).
    pub fn to_time_series(&self) -> Result<TimeSeries> {
        let values = self
            .samples
            .iter()
            .map(|&s| f64::from(s) / 32768.0)
            .collect();
        TimeSeries::from_sample_rate(values, f64::from(self.sample_rate))
    }
}

/// Knobs for [`render_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Tukey taper fraction applied before normalizing
    pub taper_fraction: f64,
    /// Loudest sample as a fraction of `i16::MAX`
    pub headroom: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            taper_fraction: DEFAULT_TAPER_FRACTION,
            headroom: DEFAULT_HEADROOM,
        }
    }
}

impl RenderConfig {
    pub fn with_taper_fraction(mut self, taper_fraction: f64) -> Self {
        self.taper_fraction = taper_fraction;
        self
    }

    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom.clamp(0.0, 1.0);
        self
    }
}

/// Renders `ts` with the default taper (1/10) and headroom (90%).
///
/// # Errors
///
/// `NonFiniteSample` if any input sample is NaN or infinite,
/// `SilentSignal` if every windowed sample is zero.
///
/// # Examples
///
/// ```
/// use noisemaze::{TimeSeries, render};
///
/// let values = (0..4096).map(|i| (i as f64 * 0.05).sin()).collect();
/// let ts = TimeSeries::from_sample_rate(values, 4096.0).unwrap();
/// let audio = render(&ts).unwrap();
/// assert_eq!(audio.sample_rate, 4096);
/// assert_eq!(audio.peak(), 29490);
/// ```
pub fn render(ts: &TimeSeries) -> Result<RenderedAudio> {
    render_with(ts, &RenderConfig::default())
}

/// Windows, normalizes and quantizes `ts` according to `config`.
///
/// 1. multiply by a Tukey window with `config.taper_fraction`;
/// 2. divide by the largest absolute windowed value and scale to
///    `i16::MAX * config.headroom`;
/// 3. round to the nearest integer.
///
/// The reported sample rate is `round(1 / sample_interval)`.
pub fn render_with(ts: &TimeSeries, config: &RenderConfig) -> Result<RenderedAudio> {
    if let Some(index) = ts.values().iter().position(|v| !v.is_finite()) {
        let value = ts.values()[index];
        return Err(Error::NonFiniteSample { index, value });
    }
    let windowed = apply_taper(ts.values(), config.taper_fraction);
    let peak = windowed.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if peak == 0.0 {
        return Err(Error::SilentSignal);
    }

    let gain = f64::from(i16::MAX) * config.headroom / peak;
    let samples = windowed
        .iter()
        .map(|v| (v * gain).round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16)
        .collect();
    let sample_rate = ts.sample_rate().round() as u32;

    debug!(
        "rendered {} samples at {sample_rate} Hz (peak {peak:.3e})",
        ts.len()
    );
    Ok(RenderedAudio {
        samples,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sinusoid(freq: f64, amp: f64, fs: f64, seconds: f64) -> TimeSeries {
        let n = (fs * seconds) as usize;
        let values = (0..n)
            .map(|i| amp * (2.0 * PI * freq * i as f64 / fs).sin())
            .collect();
        TimeSeries::from_sample_rate(values, fs).unwrap()
    }

    #[test]
    fn test_silent_signal() {
        let ts = TimeSeries::new(vec![0.0; 100], 0.001).unwrap();
        assert!(matches!(render(&ts), Err(Error::SilentSignal)));
    }

    #[test]
    fn test_spike_hidden_by_taper_is_silent() {
        // Only the first sample is non-zero, and the window zeroes it.
        let mut values = vec![0.0; 100];
        values[0] = 1.0;
        let ts = TimeSeries::new(values, 0.001).unwrap();
        assert!(matches!(render(&ts), Err(Error::SilentSignal)));
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let ts = TimeSeries::new(vec![1.0, f64::INFINITY, 1.0, 1.0, 1.0], 0.001).unwrap();
        assert!(matches!(
            render(&ts),
            Err(Error::NonFiniteSample { index: 1, .. })
        ));

        let mut values = vec![1.0; 100];
        values[40] = f64::NAN;
        let ts = TimeSeries::new(values, 0.001).unwrap();
        assert!(matches!(
            render(&ts),
            Err(Error::NonFiniteSample { index: 40, .. })
        ));
    }

    #[test]
    fn test_unit_sinusoid_peak_and_rate() {
        let ts = sinusoid(440.0, 1.0, 8000.0, 1.0);
        let audio = render(&ts).unwrap();
        assert_eq!(audio.samples.len(), ts.len());
        assert_eq!(audio.sample_rate, 8000);
        let expected = (32767.0_f64 * 0.9).round() as i32;
        assert!((audio.peak() - expected).abs() <= 1);
    }

    #[test]
    fn test_amplitude_does_not_matter() {
        let quiet = render(&sinusoid(300.0, 1e-8, 4096.0, 1.0)).unwrap();
        let loud = render(&sinusoid(300.0, 5.0, 4096.0, 1.0)).unwrap();
        for (a, b) in quiet.samples.iter().zip(&loud.samples) {
            assert!((i32::from(*a) - i32::from(*b)).abs() <= 1);
        }
    }

    #[test]
    fn test_edges_are_tapered() {
        let ts = TimeSeries::new(vec![1.0; 1000], 0.001).unwrap();
        let audio = render(&ts).unwrap();
        assert_eq!(audio.samples[0], 0);
        assert_eq!(audio.samples[999], 0);
        assert_eq!(audio.samples[500], 29490);
    }

    #[test]
    fn test_sample_rate_rounds() {
        let ts = TimeSeries::new(vec![1.0; 64], 1.0 / 44100.4).unwrap();
        assert_eq!(render(&ts).unwrap().sample_rate, 44100);
    }

    #[test]
    fn test_rerender_is_stable() {
        let first = render(&sinusoid(200.0, 0.3, 4096.0, 2.0)).unwrap();
        let again = render(&first.to_time_series().unwrap()).unwrap();
        assert_eq!(again.peak(), first.peak());
        // Middle of the series sits on the flat part of the window.
        for i in 1000..7000 {
            let diff = i32::from(first.samples[i]) - i32::from(again.samples[i]);
            assert!(diff.abs() <= 1, "sample {i} differs by {diff}");
        }
    }

    #[test]
    fn test_custom_headroom() {
        let ts = sinusoid(100.0, 1.0, 1000.0, 1.0);
        let config = RenderConfig::default().with_headroom(0.6).with_taper_fraction(0.0);
        let audio = render_with(&ts, &config).unwrap();
        assert_eq!(audio.peak(), (32767.0_f64 * 0.6).round() as i32);
    }
}

//! Brick-wall frequency-domain filters and whitening.
//!
//! Every operator is a pure function of its input series: forward
//! transform, per-bin weighting, inverse transform. [`FilterBank`] only
//! caches FFT plans between calls.
//!
//! The pass-band edges are hard: a bin is either kept untouched or zeroed.
//! This keeps the mask monotonic and exactly idempotent, at the cost of
//! some ringing for signals with energy right at the cutoff.

use log::debug;

use crate::core::TimeSeries;
use crate::error::{Error, Result};
use crate::spectral::{BandMask, SpectralTransform};

/// Default relative floor applied to the density estimate when whitening.
pub const DEFAULT_WHITEN_FLOOR_RATIO: f64 = 1e-10;

/// Settings for [`FilterBank::whiten`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitenConfig {
    /// Samples per density segment; `None` uses one second of data
    pub segment_length: Option<usize>,
    /// Density values below `floor_ratio * peak density` are raised to it
    pub floor_ratio: f64,
}

impl Default for WhitenConfig {
    fn default() -> Self {
        Self {
            segment_length: None,
            floor_ratio: DEFAULT_WHITEN_FLOOR_RATIO,
        }
    }
}

impl WhitenConfig {
    pub fn with_segment_length(mut self, segment_length: usize) -> Self {
        self.segment_length = Some(segment_length);
        self
    }

    pub fn with_floor_ratio(mut self, floor_ratio: f64) -> Self {
        self.floor_ratio = floor_ratio;
        self
    }

    /// Segment length actually used for `ts`.
    pub fn segment_length_for(&self, ts: &TimeSeries) -> usize {
        self.segment_length
            .unwrap_or_else(|| (ts.sample_rate().round() as usize).clamp(1, ts.len()))
    }
}

/// Clamps a user-supplied cutoff into `[0, nyquist]`.
fn clamp_cutoff(cutoff: f64, nyquist: f64) -> f64 {
    let clamped = if cutoff.is_nan() {
        0.0
    } else {
        cutoff.clamp(0.0, nyquist)
    };
    if clamped != cutoff {
        debug!("cutoff {cutoff} Hz clamped to {clamped} Hz (nyquist {nyquist} Hz)");
    }
    clamped
}

/// Frequency-domain filter operators sharing one FFT planner.
#[derive(Default)]
pub struct FilterBank {
    transform: SpectralTransform,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every bin below `cutoff_hz`.
    ///
    /// The cutoff is clamped to `[0, nyquist]`.
    pub fn highpass(&mut self, ts: &TimeSeries, cutoff_hz: f64) -> Result<TimeSeries> {
        let cutoff = clamp_cutoff(cutoff_hz, ts.nyquist());
        self.masked(ts, BandMask::above(cutoff))
    }

    /// Zeroes every bin above `cutoff_hz`.
    ///
    /// The cutoff is clamped to `[0, nyquist]`.
    pub fn lowpass(&mut self, ts: &TimeSeries, cutoff_hz: f64) -> Result<TimeSeries> {
        let cutoff = clamp_cutoff(cutoff_hz, ts.nyquist());
        self.masked(ts, BandMask::below(cutoff))
    }

    /// Keeps only bins within `[low_hz, high_hz]`.
    ///
    /// # Errors
    ///
    /// `InvalidBand` if `low_hz >= high_hz`, checked before the edges are
    /// clamped to `[0, nyquist]`.
    pub fn bandpass(&mut self, ts: &TimeSeries, low_hz: f64, high_hz: f64) -> Result<TimeSeries> {
        if low_hz.is_nan() || high_hz.is_nan() || low_hz >= high_hz {
            return Err(Error::InvalidBand {
                low: low_hz,
                high: high_hz,
            });
        }
        let nyquist = ts.nyquist();
        let mask = BandMask::new(clamp_cutoff(low_hz, nyquist), clamp_cutoff(high_hz, nyquist));
        self.masked(ts, mask)
    }

    /// Flattens the amplitude spectral density of `ts`.
    ///
    /// Each bin is divided by the density estimate at its frequency. The
    /// estimate is raised to at least `floor_ratio` times its peak so that
    /// bins with (near) zero density are not blown up, and the DC bin is
    /// removed.
    ///
    /// # Errors
    ///
    /// `SegmentTooLong` if the configured segment is longer than `ts`,
    /// `SilentSignal` if the density estimate is zero everywhere.
    pub fn whiten(&mut self, ts: &TimeSeries, config: &WhitenConfig) -> Result<TimeSeries> {
        let segment_length = config.segment_length_for(ts);
        let asd = self
            .transform
            .amplitude_spectral_density(ts, segment_length)?;
        let densities = asd.magnitudes();
        let peak = densities.iter().fold(0.0_f64, |acc, &d| acc.max(d));
        if peak == 0.0 || !peak.is_finite() {
            return Err(Error::SilentSignal);
        }
        let floor = peak * config.floor_ratio.max(f64::MIN_POSITIVE);

        let density_at = |f: f64| densities[asd.nearest_bin(f)].max(floor);

        let spectrum = self.transform.forward(ts)?;
        let whitened = spectrum.weighted(&|f: f64| {
            if f == 0.0 { 0.0 } else { 1.0 / density_at(f) }
        });
        let floored = spectrum
            .frequencies()
            .iter()
            .filter(|&&f| f > 0.0 && densities[asd.nearest_bin(f)] < floor)
            .count();
        debug!(
            "whitened {} bins against {segment_length}-sample segments ({floored} floored)",
            spectrum.len()
        );
        self.transform.inverse(&whitened)
    }

    fn masked(&mut self, ts: &TimeSeries, mask: BandMask) -> Result<TimeSeries> {
        let spectrum = self.transform.forward(ts)?;
        debug!("band mask [{}, {}] Hz over {} bins", mask.low, mask.high, spectrum.len());
        self.transform.inverse(&spectrum.weighted(&mask))
    }
}

/// Highpass with a one-off [`FilterBank`].
pub fn highpass(ts: &TimeSeries, cutoff_hz: f64) -> Result<TimeSeries> {
    FilterBank::new().highpass(ts, cutoff_hz)
}

/// Lowpass with a one-off [`FilterBank`].
pub fn lowpass(ts: &TimeSeries, cutoff_hz: f64) -> Result<TimeSeries> {
    FilterBank::new().lowpass(ts, cutoff_hz)
}

/// Bandpass with a one-off [`FilterBank`].
pub fn bandpass(ts: &TimeSeries, low_hz: f64, high_hz: f64) -> Result<TimeSeries> {
    FilterBank::new().bandpass(ts, low_hz, high_hz)
}

/// Whitening with `segment_length`-sample density segments.
pub fn whiten(ts: &TimeSeries, segment_length: usize) -> Result<TimeSeries> {
    FilterBank::new().whiten(ts, &WhitenConfig::default().with_segment_length(segment_length))
}

/// Whitening with one-second density segments.
pub fn whiten_default(ts: &TimeSeries) -> Result<TimeSeries> {
    FilterBank::new().whiten(ts, &WhitenConfig::default())
}

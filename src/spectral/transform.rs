//! Forward and inverse real FFT between [`TimeSeries`] and [`SpectrumView`].

use std::fmt;

use log::trace;
use realfft::RealFftPlanner;
use realfft::num_complex::Complex;

use super::WeightFunction;
use crate::core::TimeSeries;
use crate::error::Result;

/// Non-negative-frequency spectrum of a real series.
///
/// Holds `N/2 + 1` complex bins for a series of `N` samples, along with the
/// frequency of every bin (`k / (N * dt)`) and enough metadata for
/// [`SpectralTransform::inverse`] to restore the original length, sample
/// interval and start time. Bins use the unnormalized sum convention.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumView {
    bins: Vec<Complex<f64>>,
    frequencies: Vec<f64>,
    series_len: usize,
    sample_interval: f64,
    start_time: f64,
}

impl SpectrumView {
    pub(crate) fn new(
        bins: Vec<Complex<f64>>,
        series_len: usize,
        sample_interval: f64,
        start_time: f64,
    ) -> Self {
        let df = 1.0 / (series_len as f64 * sample_interval);
        let frequencies = (0..bins.len()).map(|k| k as f64 * df).collect();
        Self {
            bins,
            frequencies,
            series_len,
            sample_interval,
            start_time,
        }
    }

    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// `|bin|` for every bin.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Number of bins (`N/2 + 1`).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Length of the time series this spectrum describes.
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Bin spacing in Hz.
    pub fn frequency_resolution(&self) -> f64 {
        1.0 / (self.series_len as f64 * self.sample_interval)
    }

    /// Index of the bin closest to `frequency`, clamped to the grid.
    pub fn nearest_bin(&self, frequency: f64) -> usize {
        let k = (frequency / self.frequency_resolution()).round();
        if k.is_nan() || k <= 0.0 {
            0
        } else {
            (k as usize).min(self.bins.len() - 1)
        }
    }

    /// Bin closest to `frequency`.
    pub fn value_at(&self, frequency: f64) -> Complex<f64> {
        self.bins[self.nearest_bin(frequency)]
    }

    pub fn magnitude_at(&self, frequency: f64) -> f64 {
        self.value_at(frequency).norm()
    }

    /// Multiplies every bin by `weight(frequency)`, returning a new view.
    ///
    /// Weights that come back negative or non-finite are treated as zero.
    pub fn weighted<W: WeightFunction + ?Sized>(&self, weight: &W) -> Self {
        let mut rejected = 0usize;
        let bins = self
            .bins
            .iter()
            .zip(&self.frequencies)
            .map(|(&bin, &f)| {
                let w = weight.weight(f);
                if w.is_finite() && w >= 0.0 {
                    bin * w
                } else {
                    rejected += 1;
                    Complex::new(0.0, 0.0)
                }
            })
            .collect();
        if rejected > 0 {
            log::warn!("{rejected} bins received a non-finite or negative weight; zeroed");
        }
        Self {
            bins,
            frequencies: self.frequencies.clone(),
            ..*self
        }
    }
}

impl fmt::Display for SpectrumView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpectrumView({} bins, df = {:.4} Hz, 0..={:.1} Hz)",
            self.bins.len(),
            self.frequency_resolution(),
            self.frequencies.last().copied().unwrap_or(0.0)
        )
    }
}

/// FFT front end that caches plans across calls.
///
/// # Examples
///
/// ```
/// use noisemaze::{SpectralTransform, TimeSeries};
///
/// let ts = TimeSeries::from_sample_rate(vec![1.0, 0.0, -1.0, 0.0], 4.0).unwrap();
/// let mut transform = SpectralTransform::new();
/// let spectrum = transform.forward(&ts).unwrap();
/// assert_eq!(spectrum.frequencies(), &[0.0, 1.0, 2.0]);
///
/// let back = transform.inverse(&spectrum).unwrap();
/// assert!(back.max_abs_difference(&ts).unwrap() < 1e-12);
/// ```
pub struct SpectralTransform {
    planner: RealFftPlanner<f64>,
}

impl SpectralTransform {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Real-to-complex transform of `ts`.
    pub fn forward(&mut self, ts: &TimeSeries) -> Result<SpectrumView> {
        let bins = self.forward_values(ts.values())?;
        Ok(SpectrumView::new(
            bins,
            ts.len(),
            ts.sample_interval(),
            ts.start_time(),
        ))
    }

    /// Exact inverse of [`forward`](Self::forward), up to rounding.
    ///
    /// The imaginary parts of the DC bin and, for even lengths, the Nyquist
    /// bin are discarded since a real series cannot carry them.
    pub fn inverse(&mut self, spectrum: &SpectrumView) -> Result<TimeSeries> {
        let n = spectrum.series_len();
        let c2r = self.planner.plan_fft_inverse(n);

        let mut buffer = spectrum.bins().to_vec();
        buffer[0].im = 0.0;
        if n % 2 == 0 {
            let last = buffer.len() - 1;
            buffer[last].im = 0.0;
        }

        let mut output = c2r.make_output_vec();
        c2r.process(&mut buffer, &mut output)?;

        let norm = 1.0 / n as f64;
        for v in output.iter_mut() {
            *v *= norm;
        }
        trace!("inverse fft of {} bins into {n} samples", spectrum.len());
        TimeSeries::with_start_time(output, spectrum.sample_interval(), spectrum.start_time())
    }

    /// Raw forward transform of a slice.
    pub(crate) fn forward_values(&mut self, values: &[f64]) -> Result<Vec<Complex<f64>>> {
        let r2c = self.planner.plan_fft_forward(values.len());
        let mut input = values.to_vec();
        let mut output = r2c.make_output_vec();
        r2c.process(&mut input, &mut output)?;
        trace!("forward fft of {} samples", values.len());
        Ok(output)
    }
}

impl Default for SpectralTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward transform with a one-off planner.
pub fn forward(ts: &TimeSeries) -> Result<SpectrumView> {
    SpectralTransform::new().forward(ts)
}

/// Inverse transform with a one-off planner.
pub fn inverse(spectrum: &SpectrumView) -> Result<TimeSeries> {
    SpectralTransform::new().inverse(spectrum)
}

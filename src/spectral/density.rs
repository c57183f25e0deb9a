//! Segment-averaged amplitude spectral density.

use log::debug;
use realfft::num_complex::Complex;

use super::{SpectralTransform, SpectrumView};
use crate::core::TimeSeries;
use crate::error::{Error, Result};

/// Estimates the one-sided amplitude spectral density of `ts`.
///
/// The series is cut into non-overlapping segments of `segment_length`
/// samples (a trailing partial segment is dropped), each segment is
/// transformed, and the bin magnitudes are averaged across segments. The
/// average is scaled by `sqrt(2 * dt / segment_length)` (DC and Nyquist
/// bins are not doubled), so white noise with standard deviation `sigma`
/// comes out close to `sigma * sqrt(2 * dt)` per `sqrt(Hz)`.
///
/// The returned view lives on the frequency grid of a single segment; its
/// bins are real and non-negative.
///
/// # Errors
///
/// `SegmentTooLong` if `segment_length` exceeds the series length,
/// `InvalidLength` if it is zero.
pub fn amplitude_spectral_density(ts: &TimeSeries, segment_length: usize) -> Result<SpectrumView> {
    SpectralTransform::new().amplitude_spectral_density(ts, segment_length)
}

impl SpectralTransform {
    /// See [`amplitude_spectral_density`].
    pub fn amplitude_spectral_density(
        &mut self,
        ts: &TimeSeries,
        segment_length: usize,
    ) -> Result<SpectrumView> {
        if segment_length == 0 {
            return Err(Error::InvalidLength(
                "density segments need at least one sample".to_string(),
            ));
        }
        if segment_length > ts.len() {
            return Err(Error::SegmentTooLong {
                segment: segment_length,
                len: ts.len(),
            });
        }

        let n_bins = segment_length / 2 + 1;
        let mut sums = vec![0.0; n_bins];
        let mut n_segments = 0usize;
        for segment in ts.values().chunks_exact(segment_length) {
            let bins = self.forward_values(segment)?;
            for (acc, bin) in sums.iter_mut().zip(&bins) {
                *acc += bin.norm();
            }
            n_segments += 1;
        }
        debug!(
            "asd: {n_segments} segments of {segment_length} samples ({} dropped)",
            ts.len() % segment_length
        );

        let dt = ts.sample_interval();
        let one_sided = (2.0 * dt / segment_length as f64).sqrt();
        let edge = (dt / segment_length as f64).sqrt();
        let has_nyquist = segment_length % 2 == 0;
        let bins = sums
            .iter()
            .enumerate()
            .map(|(k, &sum)| {
                let mean = sum / n_segments as f64;
                let is_edge = k == 0 || (has_nyquist && k == n_bins - 1);
                let scale = if is_edge { edge } else { one_sided };
                Complex::new(mean * scale, 0.0)
            })
            .collect();

        Ok(SpectrumView::new(bins, segment_length, dt, ts.start_time()))
    }
}

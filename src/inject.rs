//! Additive injection of a secondary signal into a carrier.

use log::debug;

use crate::core::TimeSeries;
use crate::error::{Error, Result};

/// Relative tolerance when comparing the two sample intervals.
const RATE_TOLERANCE: f64 = 1e-9;

/// Adds `signal` into a copy of `carrier`.
///
/// The signal is normalized to unit peak, multiplied by `amplitude_scale`
/// and moved so that its first sample sits at
/// `signal.start_time() + time_offset`. Each of its samples lands on the
/// carrier sample nearest in time; samples that fall outside the carrier
/// are dropped and carrier samples outside the signal's span are left
/// untouched. The carrier itself is never modified.
///
/// # Errors
///
/// - `InvalidScale` if `amplitude_scale` is not finite
/// - `InvalidOffset` if `time_offset` is not finite
/// - `NoOverlap` if no signal sample lands on a carrier sample
/// - `InvalidRate` if the two series are sampled at different rates
/// - `SilentSignal` if `signal` is all zeros and cannot be normalized
///
/// # Examples
///
/// ```
/// use noisemaze::{TimeSeries, inject};
///
/// let carrier = TimeSeries::new(vec![0.0; 8], 0.5).unwrap();
/// let blip = TimeSeries::new(vec![2.0, -4.0], 0.5).unwrap();
/// let out = inject(&carrier, &blip, 1.0, 1.0).unwrap();
/// assert_eq!(out.values(), &[0.0, 0.0, 0.5, -1.0, 0.0, 0.0, 0.0, 0.0]);
/// ```
pub fn inject(
    carrier: &TimeSeries,
    signal: &TimeSeries,
    amplitude_scale: f64,
    time_offset: f64,
) -> Result<TimeSeries> {
    if !amplitude_scale.is_finite() {
        return Err(Error::InvalidScale(amplitude_scale));
    }
    if !time_offset.is_finite() {
        return Err(Error::InvalidOffset(time_offset));
    }

    let dt = carrier.sample_interval();
    if ((signal.sample_interval() - dt) / dt).abs() > RATE_TOLERANCE {
        return Err(Error::InvalidRate(format!(
            "cannot inject a {} Hz signal into a {} Hz carrier",
            signal.sample_rate(),
            carrier.sample_rate()
        )));
    }

    let signal_start = signal.start_time() + time_offset;
    let signal_end = signal_start + signal.duration();
    // Overlap is decided on the sample grid: a sliver shorter than half a
    // sample still rounds every sample off the carrier.
    let first_index = ((signal_start - carrier.start_time()) / dt).round() as i64;
    let carrier_len = carrier.len() as i64;
    if first_index >= carrier_len || first_index + signal.len() as i64 <= 0 {
        return Err(Error::NoOverlap {
            signal_start,
            signal_end,
            carrier_start: carrier.start_time(),
            carrier_end: carrier.end_time(),
        });
    }

    let peak = signal.peak();
    if peak == 0.0 {
        return Err(Error::SilentSignal);
    }
    let gain = amplitude_scale / peak;

    let mut values = carrier.values().to_vec();
    let mut landed = 0usize;
    for (j, &v) in signal.values().iter().enumerate() {
        let index = first_index + j as i64;
        if (0..carrier_len).contains(&index) {
            values[index as usize] += v * gain;
            landed += 1;
        }
    }
    debug!(
        "injected {landed}/{} samples at t = {signal_start:.4} s (scale {amplitude_scale:e})",
        signal.len()
    );

    carrier.with_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier() -> TimeSeries {
        TimeSeries::with_start_time((0..10).map(|i| i as f64).collect(), 0.1, 1.0).unwrap()
    }

    #[test]
    fn test_zero_scale_leaves_carrier() {
        let c = carrier();
        let s = TimeSeries::new(vec![1.0, -3.0, 2.0], 0.1).unwrap();
        let out = inject(&c, &s, 0.0, 1.2).unwrap();
        assert_eq!(out, c);
    }

    #[test]
    fn test_normalizes_and_aligns() {
        let c = TimeSeries::new(vec![0.0; 6], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0, 4.0], 1.0).unwrap();
        let out = inject(&c, &s, 2.0, 3.0).unwrap();
        assert_eq!(out.values(), &[0.0, 0.0, 0.0, 0.5, 2.0, 0.0]);
    }

    #[test]
    fn test_truncates_past_carrier_end() {
        let c = TimeSeries::new(vec![0.0; 4], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0, 1.0, 1.0], 1.0).unwrap();
        let out = inject(&c, &s, 1.0, 2.0).unwrap();
        assert_eq!(out.values(), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_truncates_before_carrier_start() {
        let c = TimeSeries::new(vec![0.0; 4], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0, 2.0, 2.0], 1.0).unwrap();
        let out = inject(&c, &s, 2.0, -1.0).unwrap();
        assert_eq!(out.values(), &[2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_offset_relative_to_signal_start() {
        let c = carrier();
        let s = TimeSeries::with_start_time(vec![1.0], 0.1, 1.0).unwrap();
        let out = inject(&c, &s, 1.0, 0.5).unwrap();
        assert_eq!(out.values()[5], 6.0);
    }

    #[test]
    fn test_no_overlap() {
        let c = carrier();
        let s = TimeSeries::new(vec![1.0; 3], 0.1).unwrap();
        assert!(matches!(
            inject(&c, &s, 1.0, 10.0),
            Err(Error::NoOverlap { .. })
        ));
        assert!(matches!(
            inject(&c, &s, 1.0, -5.0),
            Err(Error::NoOverlap { .. })
        ));
    }

    #[test]
    fn test_sub_sample_sliver_is_no_overlap() {
        let c = TimeSeries::new(vec![0.0; 4], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0], 1.0).unwrap();
        // Spans [3.6, 4.6) and [0, 4) touch, but 3.6 rounds to index 4.
        assert!(matches!(
            inject(&c, &s, 1.0, 3.6),
            Err(Error::NoOverlap { .. })
        ));
        assert!(matches!(
            inject(&c, &s, 1.0, -0.6),
            Err(Error::NoOverlap { .. })
        ));
        // 3.4 rounds onto the last carrier sample.
        assert_eq!(inject(&c, &s, 1.0, 3.4).unwrap().values(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_non_finite_offset() {
        let c = TimeSeries::new(vec![0.0; 4], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0], 1.0).unwrap();
        for offset in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                inject(&c, &s, 1.0, offset),
                Err(Error::InvalidOffset(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_scale() {
        let c = TimeSeries::new(vec![0.0; 4], 1.0).unwrap();
        let s = TimeSeries::new(vec![1.0], 1.0).unwrap();
        for scale in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                inject(&c, &s, scale, 1.0),
                Err(Error::InvalidScale(_))
            ));
        }
    }

    #[test]
    fn test_rate_mismatch() {
        let c = carrier();
        let s = TimeSeries::new(vec![1.0; 3], 0.05).unwrap();
        assert!(matches!(
            inject(&c, &s, 1.0, 1.0),
            Err(Error::InvalidRate(_))
        ));
    }

    #[test]
    fn test_silent_signal() {
        let c = carrier();
        let s = TimeSeries::new(vec![0.0; 3], 0.1).unwrap();
        assert!(matches!(inject(&c, &s, 1.0, 1.0), Err(Error::SilentSignal)));
    }

    #[test]
    fn test_carrier_untouched() {
        let c = carrier();
        let before = c.clone();
        let s = TimeSeries::new(vec![1.0; 3], 0.1).unwrap();
        let _ = inject(&c, &s, 5.0, 1.0).unwrap();
        assert_eq!(c, before);
    }
}

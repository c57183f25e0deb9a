//! Error type shared by every stage of the pipeline.

use thiserror::Error;

/// Failures raised at the point where a precondition is violated.
///
/// None of these are transient: the pipeline performs no I/O of its own,
/// so retrying the same call with the same arguments fails the same way.
#[derive(Debug, Error)]
pub enum Error {
    /// A series or segment with no samples was requested.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Sample interval (or sample rate) is not a positive finite number,
    /// or two series disagree on it.
    #[error("invalid sample rate: {0}")]
    InvalidRate(String),

    /// Element-wise operation between series of different lengths.
    #[error("length mismatch: left has {left} samples, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A crop window that selects zero samples.
    #[error("crop window [{start}, {end}) selects no samples")]
    EmptyCrop { start: f64, end: f64 },

    /// The shifted signal does not intersect the carrier at all.
    #[error(
        "signal span [{signal_start}, {signal_end}) does not overlap carrier span [{carrier_start}, {carrier_end})"
    )]
    NoOverlap {
        signal_start: f64,
        signal_end: f64,
        carrier_start: f64,
        carrier_end: f64,
    },

    /// Band edges with `low >= high`.
    #[error("invalid band: low edge {low} Hz must be below high edge {high} Hz")]
    InvalidBand { low: f64, high: f64 },

    /// Averaging segment longer than the series it averages.
    #[error("segment of {segment} samples is longer than the series ({len} samples)")]
    SegmentTooLong { segment: usize, len: usize },

    /// Normalization of an all-zero signal.
    #[error("signal is silent (peak amplitude is zero)")]
    SilentSignal,

    /// Noise or injection scale that is out of range or not finite.
    #[error("invalid scale: {0}")]
    InvalidScale(f64),

    /// Time offset that is not a finite number of seconds.
    #[error("invalid time offset: {0}")]
    InvalidOffset(f64),

    /// A sample that is NaN or infinite where finite data is required.
    #[error("sample {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },

    /// The FFT backend rejected its buffers.
    #[error("spectral transform failed: {0}")]
    Transform(#[from] realfft::FftError),

    /// Reading or writing a WAV container failed.
    #[cfg(feature = "wav")]
    #[error("wav i/o failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

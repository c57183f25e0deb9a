//! Sequencing of filter operators.

use std::fmt;

use log::debug;

use super::{FilterBank, WhitenConfig};
use crate::core::TimeSeries;
use crate::error::Result;

/// One operator in a filter chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStage {
    /// Remove content below `cutoff` Hz
    Highpass { cutoff: f64 },
    /// Remove content above `cutoff` Hz
    Lowpass { cutoff: f64 },
    /// Keep only `[low, high]` Hz
    Bandpass { low: f64, high: f64 },
    /// Flatten the amplitude spectral density
    Whiten(WhitenConfig),
}

impl FilterStage {
    /// Runs this stage on `ts` using `bank`'s planner.
    pub fn apply(&self, bank: &mut FilterBank, ts: &TimeSeries) -> Result<TimeSeries> {
        match *self {
            FilterStage::Highpass { cutoff } => bank.highpass(ts, cutoff),
            FilterStage::Lowpass { cutoff } => bank.lowpass(ts, cutoff),
            FilterStage::Bandpass { low, high } => bank.bandpass(ts, low, high),
            FilterStage::Whiten(ref config) => bank.whiten(ts, config),
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStage::Highpass { cutoff } => write!(f, "highpass({cutoff} Hz)"),
            FilterStage::Lowpass { cutoff } => write!(f, "lowpass({cutoff} Hz)"),
            FilterStage::Bandpass { low, high } => write!(f, "bandpass({low}-{high} Hz)"),
            FilterStage::Whiten(config) => match config.segment_length {
                Some(len) => write!(f, "whiten({len} samples)"),
                None => write!(f, "whiten(1 s)"),
            },
        }
    }
}

/// Applies `stages` to `ts` in order.
///
/// The first failing stage aborts the chain; no partial result is returned.
/// An empty chain returns a copy of the input.
///
/// # Examples
///
/// ```
/// use noisemaze::{FilterStage, apply_chain, sine_wave};
///
/// let low = sine_wave(20.0, 1.0, 1024.0, 2.0, false).unwrap();
/// let high = sine_wave(300.0, 1.0, 1024.0, 2.0, false).unwrap();
/// let mixed = low.add(&high).unwrap();
///
/// let stages = [
///     FilterStage::Highpass { cutoff: 100.0 },
///     FilterStage::Lowpass { cutoff: 400.0 },
/// ];
/// let out = apply_chain(&mixed, &stages).unwrap();
/// assert!(out.max_abs_difference(&high).unwrap() < 1e-9);
/// ```
pub fn apply_chain(ts: &TimeSeries, stages: &[FilterStage]) -> Result<TimeSeries> {
    let mut bank = FilterBank::new();
    stages.iter().try_fold(ts.clone(), |current, stage| {
        debug!("applying {stage}");
        stage.apply(&mut bank, &current)
    })
}

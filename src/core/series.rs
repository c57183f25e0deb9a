//! Uniformly sampled, single-channel time series.

use crate::core::Signal;
use crate::error::{Error, Result};

/// A finite, uniformly sampled real-valued signal with time metadata.
///
/// The sample interval is constant across the series and the number of
/// samples is fixed at construction. Operations that change the length,
/// the rate or the values return a new series; nothing is mutated in place.
///
/// # Examples
///
/// ```
/// use noisemaze::TimeSeries;
///
/// let ts = TimeSeries::from_sample_rate(vec![0.0, 1.0, 0.0, -1.0], 4.0).unwrap();
/// assert_eq!(ts.duration(), 1.0);
/// assert_eq!(ts.times()[2], 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    sample_interval: f64,
    start_time: f64,
}

impl TimeSeries {
    /// Creates a series starting at t = 0.
    ///
    /// # Errors
    ///
    /// `InvalidLength` if `values` is empty, `InvalidRate` if
    /// `sample_interval` is not a positive finite number.
    pub fn new(values: Vec<f64>, sample_interval: f64) -> Result<Self> {
        Self::with_start_time(values, sample_interval, 0.0)
    }

    /// Creates a series whose first sample sits at `start_time` seconds.
    pub fn with_start_time(values: Vec<f64>, sample_interval: f64, start_time: f64) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidLength(
                "a time series needs at least one sample".to_string(),
            ));
        }
        if !(sample_interval.is_finite() && sample_interval > 0.0) {
            return Err(Error::InvalidRate(format!(
                "sample interval must be positive and finite, got {sample_interval}"
            )));
        }
        if !start_time.is_finite() {
            return Err(Error::InvalidRate(format!(
                "start time must be finite, got {start_time}"
            )));
        }
        Ok(Self {
            values,
            sample_interval,
            start_time,
        })
    }

    /// Creates a series from a sample rate in Hz instead of an interval.
    pub fn from_sample_rate(values: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::InvalidRate(format!(
                "sample rate must be positive and finite, got {sample_rate}"
            )));
        }
        Self::new(values, 1.0 / sample_rate)
    }

    /// Collects `n_samples` samples from a generator into a series.
    ///
    /// # Examples
    ///
    /// ```
    /// use noisemaze::{SineOscillator, TimeSeries};
    ///
    /// let mut osc = SineOscillator::new(25.0, 0.5, 100.0);
    /// let ts = TimeSeries::from_signal(&mut osc, 100.0, 8).unwrap();
    /// assert_eq!(ts.len(), 8);
    /// assert_eq!(ts.values()[1], 0.5);
    /// ```
    pub fn from_signal<S: Signal + ?Sized>(
        signal: &mut S,
        sample_rate: f64,
        n_samples: usize,
    ) -> Result<Self> {
        let mut values = vec![0.0; n_samples];
        signal.process(&mut values);
        Self::from_sample_rate(values, sample_rate)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series, returning its samples.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn sample_rate(&self) -> f64 {
        1.0 / self.sample_interval
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Time just past the last sample (`start_time + duration`).
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration()
    }

    /// `N * sample_interval`.
    pub fn duration(&self) -> f64 {
        self.values.len() as f64 * self.sample_interval
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate()
    }

    /// Time stamp of sample `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        self.start_time + index as f64 * self.sample_interval
    }

    /// Time stamps of every sample.
    pub fn times(&self) -> Vec<f64> {
        (0..self.values.len()).map(|i| self.time_at(i)).collect()
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Returns the samples whose time stamps fall in `[t_start, t_end)`.
    ///
    /// The cropped series starts at the time stamp of its first retained sample.
    ///
    /// # Errors
    ///
    /// `EmptyCrop` if the window selects no samples.
    pub fn crop(&self, t_start: f64, t_end: f64) -> Result<Self> {
        let mut first = None;
        let mut last = 0;
        for i in 0..self.values.len() {
            let t = self.time_at(i);
            if t >= t_start && t < t_end {
                first.get_or_insert(i);
                last = i;
            }
        }
        let first = first.ok_or(Error::EmptyCrop {
            start: t_start,
            end: t_end,
        })?;
        Self::with_start_time(
            self.values[first..=last].to_vec(),
            self.sample_interval,
            self.time_at(first),
        )
    }

    /// Element-wise sum. The result keeps `self`'s time metadata.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if the lengths differ; nothing is padded or resampled.
    pub fn add(&self, other: &TimeSeries) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference `self - other`.
    pub fn sub(&self, other: &TimeSeries) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Largest absolute sample-for-sample difference between two series.
    pub fn max_abs_difference(&self, other: &TimeSeries) -> Result<f64> {
        Ok(self.sub(other)?.peak())
    }

    /// Multiplies every sample by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Applies `f` to every sample, keeping the time metadata.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
            ..*self
        }
    }

    /// Copy of the series starting at `new_start_time`.
    pub fn offset_start(&self, new_start_time: f64) -> Self {
        Self {
            values: self.values.clone(),
            start_time: new_start_time,
            ..*self
        }
    }

    /// Subtracts the first sample from every sample, so the series starts at zero.
    pub fn remove_initial_offset(&self) -> Self {
        let first = self.values[0];
        self.map(|v| v - first)
    }

    /// Replaces the samples, keeping rate and start time.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if `values` has a different length.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.values.len() {
            return Err(Error::LengthMismatch {
                left: self.values.len(),
                right: values.len(),
            });
        }
        Ok(Self { values, ..*self })
    }

    fn zip_with(&self, other: &TimeSeries, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self { values, ..*self })
    }
}

/// Adds several equally long series together.
///
/// # Errors
///
/// `InvalidLength` for an empty slice, `LengthMismatch` if any lengths differ.
pub fn sum_all(components: &[TimeSeries]) -> Result<TimeSeries> {
    let (first, rest) = components.split_first().ok_or_else(|| {
        Error::InvalidLength("cannot sum an empty list of series".to_string())
    })?;
    rest.iter().try_fold(first.clone(), |acc, ts| acc.add(ts))
}

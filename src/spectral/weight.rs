//! Frequency-domain weighting functions.

/// Maps a frequency in Hz to a non-negative gain applied to that bin.
///
/// Implemented for any `Fn(f64) -> f64`, so ad-hoc shapes can be passed as
/// closures.
///
/// # Examples
///
/// ```
/// use noisemaze::WeightFunction;
///
/// let halve = |_f: f64| 0.5;
/// assert_eq!(halve.weight(100.0), 0.5);
/// ```
pub trait WeightFunction {
    fn weight(&self, frequency: f64) -> f64;
}

impl<F: Fn(f64) -> f64> WeightFunction for F {
    fn weight(&self, frequency: f64) -> f64 {
        self(frequency)
    }
}

/// Default low-frequency floor of the red-noise shape, in Hz.
pub const DEFAULT_RED_NOISE_FLOOR_HZ: f64 = 30.0;

/// `1/f²` spectral shape with a hard floor near DC.
///
/// Bins below `f_min` get zero weight, which removes the singularity at
/// 0 Hz and the unbounded gain just above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedNoise {
    f_min: f64,
}

impl RedNoise {
    /// Creates a red-noise weight with the given floor.
    ///
    /// A non-positive floor still zeroes the DC bin.
    pub fn new(f_min: f64) -> Self {
        Self { f_min }
    }

    pub fn f_min(&self) -> f64 {
        self.f_min
    }

    pub fn with_f_min(self, f_min: f64) -> Self {
        Self { f_min }
    }
}

impl Default for RedNoise {
    fn default() -> Self {
        Self::new(DEFAULT_RED_NOISE_FLOOR_HZ)
    }
}

impl WeightFunction for RedNoise {
    fn weight(&self, frequency: f64) -> f64 {
        if frequency < self.f_min || frequency <= 0.0 {
            0.0
        } else {
            1.0 / (frequency * frequency)
        }
    }
}

/// Brick-wall pass band: gain 1 inside `[low, high]`, 0 outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandMask {
    pub low: f64,
    pub high: f64,
}

impl BandMask {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Passes everything at or above `cutoff`.
    pub fn above(cutoff: f64) -> Self {
        Self::new(cutoff, f64::INFINITY)
    }

    /// Passes everything at or below `cutoff`.
    pub fn below(cutoff: f64) -> Self {
        Self::new(f64::NEG_INFINITY, cutoff)
    }
}

impl WeightFunction for BandMask {
    fn weight(&self, frequency: f64) -> f64 {
        if frequency >= self.low && frequency <= self.high {
            1.0
        } else {
            0.0
        }
    }
}

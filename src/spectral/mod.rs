//! Time/frequency transforms and spectral weighting.
//!
//! ```text
//!  TimeSeries ──forward──▶ SpectrumView ──weighted(w)──▶ SpectrumView ──inverse──▶ TimeSeries
//!       │
//!       └──amplitude_spectral_density──▶ SpectrumView (real magnitudes)
//! ```

mod density;
mod transform;
mod weight;

pub use density::amplitude_spectral_density;
pub use transform::{SpectralTransform, SpectrumView, forward, inverse};
pub use weight::{BandMask, DEFAULT_RED_NOISE_FLOOR_HZ, RedNoise, WeightFunction};

//! Noisemaze - hide a sound in colored noise, then filter it back out.
//!
//! This library provides the signal chain for that exercise: seeded noise
//! synthesis, spectral coloring, signal injection, frequency-domain
//! filtering and whitening, and rendering to 16-bit audio.
//!
//! # Example
//!
//! ```
//! use noisemaze::{RedNoise, color, highpass, inject, render, sine_wave, white_noise};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let noise = color(&white_noise(4096.0, 4.0, 0.1, &mut rng)?, &RedNoise::default())?;
//! let secret = sine_wave(1000.0, 1.0, 4096.0, 1.0, true)?;
//!
//! let maze = inject(&noise, &secret, 1e-6, 2.0)?;
//! let found = highpass(&maze, 600.0)?;
//! let audio = render(&found)?;
//! assert_eq!(audio.sample_rate, 4096);
//! # Ok::<(), noisemaze::Error>(())
//! ```

pub mod audio;
pub mod core;
pub mod error;
pub mod filters;
pub mod inject;
pub mod noise;
pub mod oscillators;
pub mod pipeline;
pub mod spectral;

// Re-export commonly used types at the crate root
pub use audio::{RenderConfig, RenderedAudio, apply_taper, render, render_with, tukey_window};
#[cfg(feature = "wav")]
pub use audio::{read_wav_file, write_wav, write_wav_file};
pub use crate::core::{Signal, TimeSeries, sum_all};
pub use error::{Error, Result};
pub use filters::{
    FilterBank, FilterStage, WhitenConfig, apply_chain, bandpass, highpass, lowpass, whiten,
    whiten_default,
};
pub use inject::inject;
pub use noise::{WhiteNoise, color, red_noise, white_noise};
pub use oscillators::{SineOscillator, sine_wave};
pub use pipeline::{Pipeline, PipelineOutput};
pub use spectral::{
    BandMask, RedNoise, SpectralTransform, SpectrumView, WeightFunction,
    amplitude_spectral_density, forward, inverse,
};

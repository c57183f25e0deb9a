//! Audio rendering: tapering, normalization and 16-bit quantization.
//!
//! With the `wav` feature, [`write_wav`], [`write_wav_file`] and
//! [`read_wav_file`] move audio in and out of PCM containers.

mod render;
#[cfg(feature = "wav")]
mod wav;
mod window;

pub use render::{DEFAULT_HEADROOM, RenderConfig, RenderedAudio, render, render_with};
#[cfg(feature = "wav")]
pub use wav::{read_wav_file, write_wav, write_wav_file};
pub use window::{DEFAULT_TAPER_FRACTION, apply_taper, tukey_window};

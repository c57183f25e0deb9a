//! Periodic test-signal generators.

mod sine;

pub use sine::{SineOscillator, sine_wave};

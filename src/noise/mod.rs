//! Noise synthesis.
//!
//! [`white_noise`] draws seeded Gaussian samples; [`color`] reshapes any
//! series' spectrum with a [`WeightFunction`](crate::WeightFunction), e.g.
//! [`RedNoise`](crate::RedNoise) for a `1/f²` falloff.

mod color;
mod white;

pub use color::{color, red_noise};
pub use white::{WhiteNoise, white_noise};

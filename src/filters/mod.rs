//! Frequency-domain filters: highpass, lowpass, bandpass and whitening.
//!
//! All operators transform the whole series, weight the bins, and
//! transform back. They can be called one at a time or sequenced with
//! [`apply_chain`].

mod bank;
mod chain;

pub use bank::{
    DEFAULT_WHITEN_FLOOR_RATIO, FilterBank, WhitenConfig, bandpass, highpass, lowpass, whiten,
    whiten_default,
};
pub use chain::{FilterStage, apply_chain};

//! Core data types shared by every stage.
//!
//! - [`TimeSeries`] is the value threaded through synthesis, injection,
//!   filtering and rendering.
//! - [`Signal`] is the sample-by-sample generator interface used to fill a
//!   series.

mod series;
mod signal;

pub use series::{TimeSeries, sum_all};
pub use signal::Signal;

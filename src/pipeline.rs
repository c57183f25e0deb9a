//! End-to-end chain: colored noise, injection, recovery, rendering.
//!
//! ```text
//!  white_noise ─▶ color(RedNoise) ─▶ inject(secret) ─▶ FilterStage… ─▶ render
//!                     carrier             maze            recovered      audio
//! ```

use log::info;
use rand::Rng;

use crate::audio::{RenderConfig, RenderedAudio, render_with};
use crate::core::TimeSeries;
use crate::error::Result;
use crate::filters::{FilterStage, apply_chain};
use crate::inject::inject;
use crate::noise::red_noise;
use crate::spectral::RedNoise;

/// Sample rate of the default pipeline, in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 32000.0;
/// Length of the default carrier, in seconds.
pub const DEFAULT_DURATION: f64 = 8.0;
/// Standard deviation of the white noise before coloring.
pub const DEFAULT_NOISE_SCALE: f64 = 0.1;

/// Every intermediate series of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Colored noise before injection
    pub carrier: TimeSeries,
    /// Carrier with the secret added
    pub maze: TimeSeries,
    /// Maze after every filter stage
    pub recovered: TimeSeries,
    /// `recovered` rendered to 16-bit audio
    pub audio: RenderedAudio,
}

/// Parameters for generating a noisy carrier, hiding a signal in it and
/// filtering it back out.
///
/// # Examples
///
/// ```
/// use noisemaze::{FilterStage, Pipeline, sine_wave};
/// use rand::SeedableRng;
///
/// let pipeline = Pipeline::new(4096.0, 2.0)
///     .with_stage(FilterStage::Highpass { cutoff: 500.0 });
/// let secret = sine_wave(800.0, 1.0, 4096.0, 0.5, true).unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let out = pipeline.run(&secret, 1e-5, 1.0, &mut rng).unwrap();
/// assert_eq!(out.audio.sample_rate, 4096);
/// assert_eq!(out.audio.samples.len(), 8192);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    sample_rate: f64,
    duration: f64,
    noise_scale: f64,
    red_noise: RedNoise,
    stages: Vec<FilterStage>,
    render: RenderConfig,
}

impl Pipeline {
    /// Creates a pipeline with no filter stages.
    pub fn new(sample_rate: f64, duration: f64) -> Self {
        Self {
            sample_rate,
            duration,
            noise_scale: DEFAULT_NOISE_SCALE,
            red_noise: RedNoise::default(),
            stages: Vec::new(),
            render: RenderConfig::default(),
        }
    }

    pub fn with_noise_scale(mut self, noise_scale: f64) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    pub fn with_red_noise(mut self, red_noise: RedNoise) -> Self {
        self.red_noise = red_noise;
        self
    }

    /// Replaces the filter stages.
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = FilterStage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    /// Appends one filter stage.
    pub fn with_stage(mut self, stage: FilterStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Generates the colored-noise carrier.
    pub fn carrier<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TimeSeries> {
        red_noise(
            self.sample_rate,
            self.duration,
            self.noise_scale,
            &self.red_noise,
            rng,
        )
    }

    /// Runs the filter stages over `maze`.
    pub fn recover(&self, maze: &TimeSeries) -> Result<TimeSeries> {
        apply_chain(maze, &self.stages)
    }

    /// Generates a fresh carrier and runs the rest of the chain on it.
    pub fn run<R: Rng + ?Sized>(
        &self,
        secret: &TimeSeries,
        amplitude: f64,
        time_offset: f64,
        rng: &mut R,
    ) -> Result<PipelineOutput> {
        let carrier = self.carrier(rng)?;
        self.run_with_carrier(carrier, secret, amplitude, time_offset)
    }

    /// Runs injection, filtering and rendering on a caller-supplied carrier.
    ///
    /// Callers that keep their own cache of carriers use this to skip the
    /// noise synthesis.
    pub fn run_with_carrier(
        &self,
        carrier: TimeSeries,
        secret: &TimeSeries,
        amplitude: f64,
        time_offset: f64,
    ) -> Result<PipelineOutput> {
        info!(
            "pipeline: {} samples, secret at +{time_offset} s (amplitude {amplitude:e}), {} stages",
            carrier.len(),
            self.stages.len()
        );
        let maze = inject(&carrier, secret, amplitude, time_offset)?;
        let recovered = self.recover(&maze)?;
        let audio = render_with(&recovered, &self.render)?;
        Ok(PipelineOutput {
            carrier,
            maze,
            recovered,
            audio,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_DURATION)
    }
}

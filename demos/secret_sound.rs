//! Hides a three-note chord in red noise, then digs it back out.
//!
//! Writes one WAV file per stage into a `noisemaze` directory under the
//! system temp dir: the raw maze, a highpassed version, and a whitened and
//! bandpassed version. Run with `RUST_LOG=debug` to see each stage.
//!
//! ```text
//! cargo run --example secret_sound --features wav
//! ```

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::info;
use noisemaze::{
    FilterStage, Pipeline, TimeSeries, WhitenConfig, render, sine_wave, sum_all, write_wav_file,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SAMPLE_RATE: f64 = 8192.0;
const DURATION: f64 = 6.0;
const SECRET_AMPLITUDE: f64 = 2e-5;
const SECRET_OFFSET: f64 = 2.5;
const SEED: u64 = 2015;

/// Parameters that fully determine a carrier. Floats are stored as bits so
/// the key can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NoiseKey {
    sample_rate: u64,
    duration: u64,
    scale: u64,
    seed: u64,
}

impl NoiseKey {
    fn new(pipeline: &Pipeline, scale: f64, seed: u64) -> Self {
        Self {
            sample_rate: pipeline.sample_rate().to_bits(),
            duration: pipeline.duration().to_bits(),
            scale: scale.to_bits(),
            seed,
        }
    }
}

/// Carriers already synthesized in this session.
#[derive(Default)]
struct NoiseCache {
    carriers: HashMap<NoiseKey, TimeSeries>,
}

impl NoiseCache {
    fn carrier(&mut self, pipeline: &Pipeline, scale: f64, seed: u64) -> Result<TimeSeries> {
        let key = NoiseKey::new(pipeline, scale, seed);
        if let Some(cached) = self.carriers.get(&key) {
            info!("reusing cached carrier for seed {seed}");
            return Ok(cached.clone());
        }
        let carrier = pipeline.carrier(&mut StdRng::seed_from_u64(seed))?;
        self.carriers.insert(key, carrier.clone());
        Ok(carrier)
    }
}

fn chord(frequencies: &[f64]) -> Result<TimeSeries> {
    let notes = frequencies
        .iter()
        .map(|&f| sine_wave(f, 1.0, SAMPLE_RATE, 1.5, true))
        .collect::<noisemaze::Result<Vec<_>>>()?;
    Ok(sum_all(&notes)?.remove_initial_offset())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::temp_dir().join("noisemaze");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let secret = chord(&[880.0, 1108.73, 1318.51])?;
    let noise_scale = 0.1;

    let stages: [(&str, Vec<FilterStage>); 3] = [
        ("maze", Vec::new()),
        ("highpass", vec![FilterStage::Highpass { cutoff: 600.0 }]),
        (
            "whiten_bandpass",
            vec![
                FilterStage::Whiten(WhitenConfig::default()),
                FilterStage::Bandpass {
                    low: 800.0,
                    high: 1400.0,
                },
            ],
        ),
    ];

    let mut cache = NoiseCache::default();
    for (name, filters) in stages {
        let pipeline = Pipeline::new(SAMPLE_RATE, DURATION)
            .with_noise_scale(noise_scale)
            .with_stages(filters);
        let carrier = cache.carrier(&pipeline, noise_scale, SEED)?;
        let out = pipeline.run_with_carrier(carrier, &secret, SECRET_AMPLITUDE, SECRET_OFFSET)?;

        let path = out_dir.join(format!("{name}.wav"));
        write_wav_file(&out.audio, &path).with_context(|| format!("writing {}", path.display()))?;

        // How far the recovered window is from the secret, both at unit peak
        let window = out
            .recovered
            .crop(SECRET_OFFSET, SECRET_OFFSET + secret.duration())?;
        let found = window.scale(1.0 / window.peak());
        let target = secret.scale(1.0 / secret.peak());
        let mismatch = match found.max_abs_difference(&target) {
            Ok(m) => format!("{m:.3}"),
            Err(_) => "n/a".to_string(),
        };
        println!(
            "{name:>16}: {} samples at {} Hz, mismatch {mismatch} -> {}",
            out.audio.samples.len(),
            out.audio.sample_rate,
            path.display()
        );
    }

    let reference = out_dir.join("secret.wav");
    write_wav_file(&render(&secret)?, &reference)?;
    println!("{:>16}: {}", "secret", reference.display());

    Ok(())
}

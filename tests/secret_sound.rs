use noisemaze::{
    Error, FilterStage, Pipeline, RedNoise, TimeSeries, WhitenConfig, bandpass, color, forward,
    highpass, inject, inverse, render, sine_wave, white_noise,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FS: f64 = 4096.0;

fn energy(ts: &TimeSeries, start: f64, end: f64) -> f64 {
    ts.crop(start, end)
        .unwrap()
        .values()
        .iter()
        .map(|v| v * v)
        .sum()
}

fn red_carrier(seed: u64) -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    color(
        &white_noise(FS, 4.0, 1.0, &mut rng).unwrap(),
        &RedNoise::default(),
    )
    .unwrap()
}

#[test]
fn test_round_trip_recovers_series() {
    let carrier = red_carrier(1);
    let back = inverse(&forward(&carrier).unwrap()).unwrap();
    assert!(back.max_abs_difference(&carrier).unwrap() < 1e-9 * carrier.peak());
}

#[test]
fn test_secret_is_buried_then_found_by_highpass() {
    let carrier = red_carrier(2);
    let secret = sine_wave(800.0, 1.0, FS, 1.0, true).unwrap();
    let maze = inject(&carrier, &secret, 1e-5, 2.0).unwrap();

    // Unfiltered, the secret barely changes the energy in its window.
    let buried = energy(&maze, 2.0, 3.0) / energy(&carrier, 2.0, 3.0);
    assert!(buried < 1.05, "secret should be hidden, energy ratio {buried}");

    let found = highpass(&maze, 500.0).unwrap();
    let revealed = energy(&found, 2.0, 3.0) / energy(&found, 0.5, 1.5);
    assert!(revealed > 10.0, "secret should stand out, window ratio {revealed}");
}

#[test]
fn test_whitening_keeps_the_band_chain_usable() {
    let carrier = red_carrier(3);
    let secret = sine_wave(800.0, 1.0, FS, 1.0, true).unwrap();
    let maze = inject(&carrier, &secret, 1e-5, 2.0).unwrap();

    let pipeline = Pipeline::new(FS, 4.0).with_stages([
        FilterStage::Whiten(WhitenConfig::default()),
        FilterStage::Bandpass {
            low: 100.0,
            high: 400.0,
        },
    ]);
    let found = pipeline.recover(&maze).unwrap();
    assert_eq!(found.len(), maze.len());
    assert!(found.values().iter().all(|v| v.is_finite()));

    // Nothing of the 800 Hz secret survives a 100..400 Hz band.
    let spectrum = forward(&found).unwrap();
    assert!(spectrum.magnitude_at(800.0) < 1e-9 * spectrum.magnitude_at(250.0));
}

#[test]
fn test_pipeline_renders_audio() {
    let pipeline = Pipeline::new(FS, 4.0).with_stage(FilterStage::Highpass { cutoff: 500.0 });
    let secret = sine_wave(800.0, 1.0, FS, 1.0, true).unwrap();
    let out = pipeline
        .run(&secret, 1e-5, 2.0, &mut StdRng::seed_from_u64(4))
        .unwrap();

    assert_eq!(out.audio.sample_rate, 4096);
    assert_eq!(out.audio.samples.len(), out.recovered.len());
    assert_eq!(out.audio.peak(), (32767.0_f64 * 0.9).round() as i32);
}

#[test]
fn test_reported_failures() {
    let carrier = red_carrier(5);
    let secret = sine_wave(800.0, 1.0, FS, 1.0, true).unwrap();

    assert!(matches!(
        inject(&carrier, &secret, 1.0, 10.0),
        Err(Error::NoOverlap { .. })
    ));
    assert!(matches!(
        inject(&carrier, &secret, 1.0, f64::NAN),
        Err(Error::InvalidOffset(_))
    ));
    assert!(matches!(
        bandpass(&carrier, 900.0, 700.0),
        Err(Error::InvalidBand { .. })
    ));
    let silence = TimeSeries::from_sample_rate(vec![0.0; 4096], FS).unwrap();
    assert!(matches!(render(&silence), Err(Error::SilentSignal)));
}

#[test]
fn test_same_seed_same_carrier() {
    assert_eq!(red_carrier(6), red_carrier(6));
    assert_ne!(red_carrier(6), red_carrier(7));
}

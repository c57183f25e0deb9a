//! WAV container I/O for rendered audio and recorded reference signals.
//!
//! Only compiled with the `wav` feature.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use log::debug;

use super::RenderedAudio;
use crate::core::TimeSeries;
use crate::error::{Error, Result};

fn mono_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encodes `audio` as mono 16-bit PCM into `writer`.
pub fn write_wav<W: Write + Seek>(audio: &RenderedAudio, writer: W) -> Result<()> {
    let mut wav = hound::WavWriter::new(writer, mono_spec(audio.sample_rate))?;
    for &sample in &audio.samples {
        wav.write_sample(sample)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Encodes `audio` into a new file at `path`.
pub fn write_wav_file<P: AsRef<Path>>(audio: &RenderedAudio, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(hound::Error::from)?;
    write_wav(audio, BufWriter::new(file))?;
    debug!(
        "wrote {} samples to {}",
        audio.samples.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Reads the first channel of a WAV file as a series starting at t = 0.
///
/// Integer samples are scaled to [-1.0, 1.0); float samples are kept as is.
///
/// # Errors
///
/// `Wav` for unreadable files, `InvalidLength` for files with no samples.
pub fn read_wav_file<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
    let mut reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let samples: std::result::Result<Vec<f64>, _> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect(),
        hound::SampleFormat::Int => {
            let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_value))
                .collect()
        }
    };
    let samples = samples?;

    // For multi-channel files, keep every Nth sample (first channel)
    let channel_samples: Vec<f64> = if spec.channels > 1 {
        samples
            .iter()
            .step_by(usize::from(spec.channels))
            .copied()
            .collect()
    } else {
        samples
    };
    if channel_samples.is_empty() {
        return Err(Error::InvalidLength(format!(
            "{} contains no samples",
            path.as_ref().display()
        )));
    }

    debug!(
        "read {} samples at {} Hz from {}",
        channel_samples.len(),
        spec.sample_rate,
        path.as_ref().display()
    );
    TimeSeries::from_sample_rate(channel_samples, f64::from(spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn audio() -> RenderedAudio {
        RenderedAudio {
            samples: vec![0, 1000, -1000, i16::MAX, i16::MIN, 0],
            sample_rate: 8000,
        }
    }

    #[test]
    fn test_write_to_memory() {
        let mut buffer = Cursor::new(Vec::new());
        write_wav(&audio(), &mut buffer).unwrap();
        let bytes = buffer.into_inner();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, audio().samples);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("noisemaze-wav-{}.wav", std::process::id()));
        write_wav_file(&audio(), &path).unwrap();
        let ts = read_wav_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(ts.len(), 6);
        assert!((ts.sample_rate() - 8000.0).abs() < 1e-9);
        assert!((ts.values()[1] - 1000.0 / 32768.0).abs() < 1e-12);
        assert_eq!(ts.values()[4], -1.0);
    }

    #[test]
    fn test_file_matches_memory_encoding() {
        let path = std::env::temp_dir().join(format!("noisemaze-bytes-{}.wav", std::process::id()));
        write_wav_file(&audio(), &path).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut buffer = Cursor::new(Vec::new());
        write_wav(&audio(), &mut buffer).unwrap();
        assert_eq!(on_disk, buffer.into_inner());
    }

    #[test]
    fn test_unwritable_path() {
        let result = write_wav_file(&audio(), "/definitely/not/here/out.wav");
        assert!(matches!(result, Err(Error::Wav(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_wav_file("/definitely/not/here.wav"),
            Err(Error::Wav(_))
        ));
    }
}

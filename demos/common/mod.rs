//! Common utilities for the rendering demos.

use anyhow::{Context, Result};
use siggen::{BreakpointSet, Signal};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const SAMPLE_RATE: u32 = 44100;

/// Installs a logger so library debug output shows up on stderr.
pub fn init_logging() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;
    Ok(())
}

/// Reads a breakpoint file from disk.
#[allow(dead_code)]
pub fn load_breakpoints(path: &str) -> Result<BreakpointSet> {
    let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
    BreakpointSet::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse breakpoints in {path}"))
}

/// Pulls `seconds` worth of samples from a signal.
#[allow(dead_code)]
pub fn render<S: Signal>(signal: &mut S, seconds: f64) -> Vec<f64> {
    let mut buffer = vec![0.0; (seconds * SAMPLE_RATE as f64).round() as usize];
    signal.process(&mut buffer);
    buffer
}

/// Reads the first channel of a WAV file, scaled to [-1.0, 1.0], along with
/// its sample rate.
#[allow(dead_code)]
pub fn read_first_channel<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, f64)> {
    let path = path.as_ref();
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_value))
                .collect::<Result<_, _>>()?
        }
    };
    let channel = samples
        .into_iter()
        .step_by(spec.channels.max(1) as usize)
        .collect();
    Ok((channel, spec.sample_rate as f64))
}

fn to_i16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f64) as i16
}

/// Writes 16-bit mono samples.
#[allow(dead_code)]
pub fn write_mono<P: AsRef<Path>>(path: P, samples: &[f64]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(to_i16(sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Writes 16-bit interleaved stereo frames.
#[allow(dead_code)]
pub fn write_stereo<P: AsRef<Path>>(path: P, frames: &[(f64, f64)]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &(left, right) in frames {
        writer.write_sample(to_i16(left))?;
        writer.write_sample(to_i16(right))?;
    }
    writer.finalize()?;
    Ok(())
}

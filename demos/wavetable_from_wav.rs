//! Loads a single-cycle waveform from a WAV file and plays it as a wavetable.
//!
//! Usage:
//!
//! ```text
//! cargo run --example wavetable_from_wav --features wavetable-loader -- <cycle.wav> <out.wav>
//! ```
//!
//! The cycle is played with cubic interpolation on a three second glide from
//! 110 Hz to 440 Hz with a short fade in and out.

mod common;

use anyhow::{Result, bail};
use common::{SAMPLE_RATE, init_logging, render, write_mono};
use siggen::{
    BreakpointSet, BreakpointStream, Interpolation, OscillatorExt, Param, SignalExt,
    TableOscillator, Wavetable,
};
use std::sync::Arc;

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: wavetable_from_wav <cycle.wav> <out.wav>");
    }

    let table = Arc::new(Wavetable::from_wav_file(&args[0])?);
    log::info!(
        "loaded {} samples, peak {:.3}",
        table.table_size(),
        table.peak()
    );

    let sample_rate = SAMPLE_RATE as f64;
    let glide: BreakpointSet = "0 110\n3 440".parse()?;
    let fade: BreakpointSet = "0 0\n0.05 0.8\n2.9 0.8\n3 0".parse()?;

    let mut voice = TableOscillator::new(sample_rate, table)?
        .with_interpolation(Interpolation::Cubic)
        .driven_by(Param::modulated(BreakpointStream::new(glide, sample_rate)?))
        .gain(BreakpointStream::new(fade, sample_rate)?);
    let samples = render(&mut voice, 3.0);

    write_mono(&args[1], &samples)?;
    Ok(())
}

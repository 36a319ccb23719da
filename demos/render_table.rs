//! Renders a band-limited wavetable oscillator to a WAV file.
//!
//! Usage:
//!
//! ```text
//! cargo run --example render_table -- <waveform> <harmonics> <out.wav> [pitch.brk]
//! ```
//!
//! Without a pitch file the tone plays at 220 Hz for two seconds. With one,
//! the breakpoint curve drives the frequency and sets the duration.

mod common;

use anyhow::{Context, Result, bail};
use common::{SAMPLE_RATE, init_logging, load_breakpoints, render, write_mono};
use siggen::{
    BreakpointStream, Interpolation, OscillatorExt, Param, SignalExt, TableOscillator, Waveform,
    Wavetable,
};
use std::sync::Arc;

const TABLE_SIZE: usize = 2048;

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: render_table <waveform> <harmonics> <out.wav> [pitch.brk]");
    }

    let waveform: Waveform = args[0].parse()?;
    let harmonics: usize = args[1].parse().context("harmonics must be a whole number")?;
    let table = Arc::new(Wavetable::new(waveform, TABLE_SIZE, harmonics)?);
    let sample_rate = SAMPLE_RATE as f64;

    let (frequency, seconds) = match args.get(3) {
        Some(path) => {
            let pitch = load_breakpoints(path)?;
            let seconds = pitch.duration();
            let stream = BreakpointStream::new(pitch, sample_rate)?;
            (Param::modulated(stream), seconds)
        }
        None => (Param::fixed(220.0), 2.0),
    };

    let mut voice = TableOscillator::new(sample_rate, table)?
        .with_interpolation(Interpolation::Cubic)
        .driven_by(frequency)
        .gain(0.7);
    let samples = render(&mut voice, seconds);

    write_mono(&args[2], &samples)?;
    log::info!("wrote {} samples of {waveform} to {}", samples.len(), args[2]);
    Ok(())
}

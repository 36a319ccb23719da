//! Renders additive synthesis with an oscillator bank.
//!
//! Usage:
//!
//! ```text
//! cargo run --example render_additive -- <waveform> <partials> <frequency> <out.wav> [amp.brk]
//! ```
//!
//! An optional amplitude breakpoint file shapes the level and sets the
//! duration; its values must lie in [0, 1].

mod common;

use anyhow::{Context, Result, bail};
use common::{SAMPLE_RATE, init_logging, load_breakpoints, render, write_mono};
use siggen::{BreakpointStream, OscillatorBank, OscillatorExt, Param, SignalExt, Waveform};

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!("usage: render_additive <waveform> <partials> <frequency> <out.wav> [amp.brk]");
    }

    let waveform: Waveform = args[0].parse()?;
    let partials: usize = args[1].parse().context("partials must be a whole number")?;
    let frequency: f64 = args[2].parse().context("frequency must be a number")?;
    if frequency <= 0.0 {
        bail!("frequency must be positive");
    }
    let sample_rate = SAMPLE_RATE as f64;

    let (amplitude, seconds) = match args.get(4) {
        Some(path) => {
            let envelope = load_breakpoints(path)?;
            if !envelope.in_range(0.0, 1.0) {
                bail!("amplitude values in {path} must lie in [0, 1]");
            }
            let seconds = envelope.duration();
            (Param::modulated(BreakpointStream::new(envelope, sample_rate)?), seconds)
        }
        None => (Param::fixed(0.8), 2.0),
    };

    let mut voice = OscillatorBank::new(waveform, sample_rate, partials)?
        .driven_by(frequency)
        .gain(amplitude);
    let samples = render(&mut voice, seconds);

    write_mono(&args[3], &samples)?;
    log::info!(
        "wrote {:.2}s of {waveform} from {partials} partials to {}",
        seconds,
        args[3]
    );
    Ok(())
}

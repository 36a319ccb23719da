//! Extracts the amplitude envelope of a sound and imposes it on a sine tone.
//!
//! Usage:
//!
//! ```text
//! cargo run --example envelope_follow -- <in.wav> <envelope.brk> <out.wav>
//! ```
//!
//! The envelope is written as a breakpoint file. The output is a stereo
//! 220 Hz sine shaped by that envelope and panned from left to right over
//! its length.

mod common;

use anyhow::{Result, bail};
use common::{SAMPLE_RATE, init_logging, read_first_channel, write_stereo};
use siggen::breakpoints::{DEFAULT_WINDOW, extract_envelope};
use siggen::{
    BreakpointSet, BreakpointStream, OscillatorExt, PanPosition, PhaseOscillator, Signal,
    SignalExt,
};

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: envelope_follow <in.wav> <envelope.brk> <out.wav>");
    }

    let (input, input_rate) = read_first_channel(&args[0])?;
    let envelope = extract_envelope(&input, input_rate, DEFAULT_WINDOW)?;
    std::fs::write(&args[1], envelope.to_string())?;
    log::info!("wrote {} envelope points to {}", envelope.len(), args[1]);

    let sample_rate = SAMPLE_RATE as f64;
    let seconds = envelope.duration();
    let frame_count = (seconds * sample_rate).round() as usize;

    let pan: BreakpointSet = format!("0 -1\n{seconds} 1").parse()?;
    let mut position = BreakpointStream::new(pan, sample_rate)?;
    let mut voice = PhaseOscillator::sine(sample_rate)?
        .driven_by(220.0)
        .gain(BreakpointStream::new(envelope, sample_rate)?);

    let frames: Vec<(f64, f64)> = (0..frame_count)
        .map(|_| PanPosition::constant_power(position.tick()).apply(voice.next_sample()))
        .collect();

    write_stereo(&args[2], &frames)?;
    log::info!("wrote {frame_count} stereo frames to {}", args[2]);
    Ok(())
}

//! Siggen - breakpoint automation and oscillator synthesis for Rust
//!
//! This library turns sparse `(time, value)` control points into dense
//! per-sample control signals, and turns frequencies (fixed or automated)
//! into periodic waveforms with analytic, table lookup and additive
//! oscillators.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use siggen::{
//!     BreakpointSet, BreakpointStream, Interpolation, OscillatorExt, Param, Signal,
//!     SignalExt, TableOscillator, Waveform, Wavetable,
//! };
//!
//! let sample_rate = 44100.0;
//! let table = Arc::new(Wavetable::new(Waveform::SawUp, 2048, 64).unwrap());
//!
//! // Pitch glides up an octave while the level fades out
//! let pitch: BreakpointSet = "0 220\n2 440".parse().unwrap();
//! let level: BreakpointSet = "0 1\n2 0".parse().unwrap();
//!
//! let mut voice = TableOscillator::new(sample_rate, table)
//!     .unwrap()
//!     .with_interpolation(Interpolation::Linear)
//!     .driven_by(Param::modulated(BreakpointStream::new(pitch, sample_rate).unwrap()))
//!     .gain(Param::modulated(BreakpointStream::new(level, sample_rate).unwrap()));
//!
//! let mut buffer = vec![0.0; 1024];
//! voice.process(&mut buffer);
//! assert!(buffer.iter().all(|s| s.abs() <= 1.0));
//! ```
//!
//! # Features
//!
//! - `synth` (default): oscillators, wavetables and panning
//! - `macros`: the compile-time `breakpoints!` macro
//! - `wavetable-loader`: load single-cycle wavetables from WAV files

pub mod breakpoints;
pub mod error;
pub mod signals;
mod waveform;

#[cfg(feature = "synth")]
pub mod oscillators;
#[cfg(feature = "synth")]
mod pan;

// Re-export commonly used types at the crate root
pub use breakpoints::{
    Breakpoint, BreakpointCursor, BreakpointSet, BreakpointStream, extract_envelope,
};
pub use error::{ConstructionError, Error, ParseError, Result};
pub use signals::{Param, Signal, SignalExt};
pub use waveform::{UnknownWaveform, Waveform};

#[cfg(feature = "synth")]
pub use oscillators::{
    Driven, GUARD_SAMPLES, Interpolation, Oscillator, OscillatorBank, OscillatorExt,
    PhaseOscillator, TableOscillator, Wavetable,
};
#[cfg(feature = "synth")]
pub use pan::{PanPosition, pan_frame};

#[cfg(feature = "macros")]
pub use siggen_macros::breakpoints;

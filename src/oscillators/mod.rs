//! Phase-accumulator oscillators.
//!
//! Three ways to turn a frequency into a periodic waveform, sample by sample:
//!
//! - [`PhaseOscillator`] evaluates an analytic formula (sine, square, saws,
//!   triangle, pulse) at a running phase
//! - [`TableOscillator`] reads a precomputed [`Wavetable`] with truncating,
//!   linear or cubic interpolation
//! - [`OscillatorBank`] sums live sine partials of a harmonic series
//!
//! All three implement [`Oscillator`], take the frequency as an argument to
//! every tick, and return the value at the current phase before advancing.

mod accumulator;
mod bank;
mod harmonics;
mod phase;
mod table;
mod traits;
mod wavetable;

pub use bank::OscillatorBank;
pub use phase::PhaseOscillator;
pub use table::{Interpolation, TableOscillator};
pub use traits::{Driven, Oscillator, OscillatorExt};
pub use wavetable::{GUARD_SAMPLES, Wavetable};

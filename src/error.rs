//! Error types for breakpoint parsing and component construction.
//!
//! Parsing and construction are the only fallible operations in the crate.
//! Once a stream or oscillator exists, ticking it never fails.

use thiserror::Error;

/// Failure while reading breakpoint data.
///
/// Line numbers are 1-based positions in the input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line does not start with a number.
    #[error("line {line} has non-numeric data")]
    NonNumeric { line: usize },

    /// The line holds a time but no value.
    #[error("line {line} has an incomplete breakpoint")]
    IncompletePair { line: usize },

    /// The time on this line is earlier than the previous breakpoint.
    #[error("breakpoint at line {line} not increasing in time ({time} < {previous})")]
    NotIncreasing {
        line: usize,
        time: f64,
        previous: f64,
    },

    /// Fewer than two breakpoints were found.
    #[error("too few breakpoints: found {count}, at least 2 required")]
    TooFewPoints { count: usize },

    /// The underlying reader failed.
    #[error("failed to read breakpoint data: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid parameters passed to a constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// Sample rate must be finite and positive.
    #[error("sample rate must be positive (was {sample_rate})")]
    InvalidSampleRate { sample_rate: f64 },

    /// A breakpoint stream needs at least one span.
    #[error("too few breakpoints: found {count}, at least 2 required")]
    TooFewBreakpoints { count: usize },

    /// A wavetable needs at least one sample per cycle.
    #[error("wavetable cannot be empty")]
    EmptyTable,

    /// Harmonic count outside `1..length / 2`.
    #[error("harmonic count {harmonics} must be at least 1 and less than half the table length ({length})")]
    HarmonicCount { harmonics: usize, length: usize },

    /// The waveform has no table or partial representation.
    #[error("waveform {waveform} cannot be synthesized from partials")]
    UnsupportedWaveform { waveform: crate::Waveform },

    /// An oscillator bank needs at least one partial.
    #[error("number of partials must be positive")]
    NoPartials,

    /// Envelope window shorter than one sample.
    #[error("envelope window of {window} seconds is shorter than one sample")]
    InvalidWindow { window: f64 },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[cfg(feature = "wavetable-loader")]
    #[error("failed to load wavetable: {0}")]
    Wav(#[from] hound::Error),
}

/// Result alias defaulting to the crate-level [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<f64, ConstructionError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(ConstructionError::InvalidSampleRate { sample_rate })
    }
}

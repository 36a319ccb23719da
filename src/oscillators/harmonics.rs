//! Fourier series of the band-limited waveform shapes.
//!
//! Every shape is written as a sum of cosine partials
//! `amplitude * cos(2π * (number * p + offset))` for a cycle position
//! `p` in `[0, 1)`. The offset is in cycles of the partial itself, so
//! -0.25 turns a cosine into a sine.

use std::f64::consts::TAU;

use crate::Waveform;
use crate::error::ConstructionError;

/// One term of a harmonic series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Partial {
    /// Harmonic number, 1 for the fundamental
    pub number: usize,
    pub amplitude: f64,
    /// Phase offset in cycles of this partial
    pub offset: f64,
}

impl Partial {
    /// Value of this partial at cycle position `position`.
    pub fn value_at(&self, position: f64) -> f64 {
        self.amplitude * (TAU * (self.number as f64 * position + self.offset)).cos()
    }
}

/// The first `count` non-zero partials of `waveform`.
///
/// | Waveform   | Harmonics | Amplitude | Basis           |
/// |------------|-----------|-----------|-----------------|
/// | `Sine`     | 1         | 1         | sine            |
/// | `Square`   | odd       | 1/n       | sine            |
/// | `Triangle` | odd       | 1/n²      | cosine          |
/// | `SawDown`  | all       | 1/n       | sine            |
/// | `SawUp`    | all       | 1/n       | negated sine    |
///
/// `Sine` always yields its single partial. A count of zero yields an empty
/// series; callers validate it.
pub(crate) fn series(waveform: Waveform, count: usize) -> Result<Vec<Partial>, ConstructionError> {
    let (step, offset, inverse_square) = match waveform {
        Waveform::Sine => {
            return Ok(vec![Partial {
                number: 1,
                amplitude: 1.0,
                offset: -0.25,
            }]);
        }
        Waveform::Square => (2, -0.25, false),
        Waveform::Triangle => (2, 0.0, true),
        Waveform::SawDown => (1, -0.25, false),
        Waveform::SawUp => (1, 0.25, false),
        Waveform::Pulse => return Err(ConstructionError::UnsupportedWaveform { waveform }),
    };

    Ok((0..count)
        .map(|k| {
            let number = 1 + k * step;
            let n = number as f64;
            Partial {
                number,
                amplitude: if inverse_square { 1.0 / (n * n) } else { 1.0 / n },
                offset,
            }
        })
        .collect())
}

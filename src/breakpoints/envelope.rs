//! Amplitude envelope extraction.
//!
//! Turns a block of samples into a breakpoint curve that follows its peak
//! level, which can then drive a [`BreakpointStream`](super::BreakpointStream)
//! to impose the envelope on another sound.

use log::debug;

use super::set::{Breakpoint, BreakpointSet};
use crate::error::{self, ConstructionError};

/// Default analysis window in seconds (15 ms).
pub const DEFAULT_WINDOW: f64 = 0.015;

/// Largest absolute sample value in `samples`, or 0.0 when empty.
pub fn peak<T: Copy + Into<f64>>(samples: &[T]) -> f64 {
    samples
        .iter()
        .fold(0.0, |peak: f64, &sample| peak.max(sample.into().abs()))
}

/// Extracts a peak-amplitude envelope with one breakpoint per window.
///
/// Each window of `window` seconds contributes a point at its start time whose
/// value is the window's peak absolute sample. A trailing partial window
/// contributes a point too.
///
/// # Errors
///
/// * [`ConstructionError::InvalidSampleRate`] - rate is zero, negative or not finite
/// * [`ConstructionError::InvalidWindow`] - the window is shorter than one sample
/// * [`ConstructionError::TooFewBreakpoints`] - the input spans fewer than two windows
///
/// # Examples
///
/// ```
/// use siggen::breakpoints::extract_envelope;
///
/// let samples = [0.125_f32, -0.5, 0.25, 0.2, 0.0, -0.125];
/// let envelope = extract_envelope(&samples, 2.0, 1.0).unwrap();
/// let values: Vec<f64> = envelope.iter().map(|p| p.value).collect();
/// assert_eq!(values, vec![0.5, 0.25, 0.125]);
/// ```
pub fn extract_envelope<T: Copy + Into<f64>>(
    samples: &[T],
    sample_rate: f64,
    window: f64,
) -> Result<BreakpointSet, ConstructionError> {
    let sample_rate = error::check_sample_rate(sample_rate)?;
    let window_size = if window.is_finite() && window > 0.0 {
        (window * sample_rate) as usize
    } else {
        0
    };
    if window_size == 0 {
        return Err(ConstructionError::InvalidWindow { window });
    }

    let points: Vec<Breakpoint> = samples
        .chunks(window_size)
        .enumerate()
        .map(|(i, chunk)| {
            let time = (i * window_size) as f64 / sample_rate;
            Breakpoint::new(time, peak(chunk))
        })
        .collect();

    if points.len() < 2 {
        return Err(ConstructionError::TooFewBreakpoints {
            count: points.len(),
        });
    }
    debug!(
        "extracted {} envelope points with a {}-sample window",
        points.len(),
        window_size
    );
    Ok(BreakpointSet::from_ordered(points))
}

//! Additive synthesis from a bank of sine oscillators.

use log::debug;

use super::harmonics;
use super::{Oscillator, PhaseOscillator};
use crate::Waveform;
use crate::error::{self, ConstructionError};

/// Sums one sine oscillator per partial of a waveform's harmonic series.
///
/// Unlike a [`Wavetable`](super::Wavetable), the series is evaluated live
/// on every tick, so the cost grows with the partial count. The relative
/// amplitudes are rescaled to sum to 1.0, which keeps the output within
/// [-1, 1] for any partial count.
///
/// Each partial's shape offset (cosine for triangle, inversion for saw-up)
/// is applied once as the initial phase of its oscillator.
///
/// # Examples
///
/// ```
/// use siggen::{Oscillator, OscillatorBank, Waveform};
///
/// let mut square = OscillatorBank::new(Waveform::Square, 44100.0, 8).unwrap();
/// assert_eq!(square.partials().len(), 8);
///
/// let samples: Vec<f64> = (0..441).map(|_| square.tick(100.0)).collect();
/// assert!(samples.iter().all(|s| s.abs() <= 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct OscillatorBank {
    waveform: Waveform,
    /// (relative amplitude, relative frequency) per partial
    partials: Vec<(f64, f64)>,
    oscillators: Vec<PhaseOscillator>,
    sample_rate: f64,
}

impl OscillatorBank {
    /// Creates a bank producing `waveform` from `partial_count` partials.
    ///
    /// Sine always uses a single partial.
    ///
    /// # Errors
    ///
    /// * [`ConstructionError::InvalidSampleRate`] - rate is zero, negative or not finite
    /// * [`ConstructionError::NoPartials`] - `partial_count` is zero
    /// * [`ConstructionError::UnsupportedWaveform`] - `Pulse` has no fixed series
    pub fn new(
        waveform: Waveform,
        sample_rate: f64,
        partial_count: usize,
    ) -> Result<Self, ConstructionError> {
        let sample_rate = error::check_sample_rate(sample_rate)?;
        if partial_count == 0 {
            return Err(ConstructionError::NoPartials);
        }
        let series = harmonics::series(waveform, partial_count)?;

        let total: f64 = series.iter().map(|p| p.amplitude).sum();
        let partials = series
            .iter()
            .map(|p| (p.amplitude / total, p.number as f64))
            .collect();
        // A cosine partial with offset o is a sine started o + 1/4 cycle in
        let mut oscillators = Vec::with_capacity(series.len());
        for partial in &series {
            oscillators.push(PhaseOscillator::sine(sample_rate)?.with_phase(partial.offset + 0.25));
        }

        debug!(
            "{} oscillator bank: {} partials at {} Hz",
            waveform,
            series.len(),
            sample_rate
        );
        Ok(Self {
            waveform,
            partials,
            oscillators,
            sample_rate,
        })
    }

    /// Normalized `(relative amplitude, relative frequency)` pairs.
    pub fn partials(&self) -> &[(f64, f64)] {
        &self.partials
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

impl Oscillator for OscillatorBank {
    fn tick(&mut self, frequency: f64) -> f64 {
        self.oscillators
            .iter_mut()
            .zip(&self.partials)
            .map(|(osc, &(amplitude, ratio))| amplitude * osc.tick(frequency * ratio))
            .sum()
    }

    fn frequency(&self) -> f64 {
        // The first partial is always the fundamental
        self.oscillators
            .first()
            .map_or(0.0, |osc| osc.frequency())
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn reset(&mut self) {
        for osc in &mut self.oscillators {
            osc.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TableOscillator, Wavetable};
    use std::sync::Arc;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn render(waveform: Waveform, partials: usize, count: usize) -> Vec<f64> {
        let mut bank = OscillatorBank::new(waveform, 1000.0, partials).unwrap();
        (0..count).map(|_| bank.tick(1.0)).collect()
    }

    #[test]
    fn test_amplitudes_sum_to_one() {
        for waveform in Waveform::HARMONIC {
            for count in [1, 2, 10, 50] {
                let bank = OscillatorBank::new(waveform, 48000.0, count).unwrap();
                let total: f64 = bank.partials().iter().map(|p| p.0).sum();
                assert!(approx_eq(total, 1.0), "{waveform} x{count}: {total}");
                assert!(bank.partials().iter().all(|p| p.0 > 0.0));
            }
        }
    }

    #[test]
    fn test_relative_frequencies() {
        let square = OscillatorBank::new(Waveform::Square, 48000.0, 4).unwrap();
        let ratios: Vec<f64> = square.partials().iter().map(|p| p.1).collect();
        assert_eq!(ratios, vec![1.0, 3.0, 5.0, 7.0]);

        let saw = OscillatorBank::new(Waveform::SawDown, 48000.0, 4).unwrap();
        let ratios: Vec<f64> = saw.partials().iter().map(|p| p.1).collect();
        assert_eq!(ratios, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_square_converges() {
        // Ratio of the level just after the zero crossing to the plateau
        let steepness = |partials| {
            let samples = render(Waveform::Square, partials, 1000);
            for (k, &s) in samples.iter().enumerate() {
                assert!(s.abs() <= 1.0);
                if (1..500).contains(&k) {
                    assert!(s > 0.0, "{partials} partials, sample {k}: {s}");
                } else if k > 500 {
                    assert!(s < 0.0, "{partials} partials, sample {k}: {s}");
                }
            }
            samples[10] / samples[250]
        };
        let (few, some, many) = (steepness(1), steepness(5), steepness(25));
        assert!(few < some && some < many, "{few} {some} {many}");
    }

    #[test]
    fn test_triangle_starts_at_peak() {
        let samples = render(Waveform::Triangle, 6, 501);
        assert!(approx_eq(samples[0], 1.0));
        assert!(approx_eq(samples[500], -1.0));
    }

    #[test]
    fn test_saw_up_inverts_saw_down() {
        let up = render(Waveform::SawUp, 12, 1000);
        let down = render(Waveform::SawDown, 12, 1000);
        for (k, (u, d)) in up.iter().zip(&down).enumerate() {
            assert!(approx_eq(*u, -d), "sample {k}: {u} vs {d}");
        }
        assert!(up[100] < up[400]);
    }

    #[test]
    fn test_matches_wavetable_shape() {
        // Same series, so the bank and a normalized table differ only in scale
        let table = Arc::new(Wavetable::new(Waveform::Square, 1000, 5).unwrap());
        let mut table_osc = TableOscillator::new(1000.0, table).unwrap();
        let samples = render(Waveform::Square, 5, 1000);
        let table_samples: Vec<f64> = (0..1000).map(|_| table_osc.tick(1.0)).collect();
        let scale = samples[250] / table_samples[250];
        for k in (0..1000).step_by(7) {
            assert!(
                (samples[k] - scale * table_samples[k]).abs() < 1e-6,
                "sample {k}"
            );
        }
    }

    #[test]
    fn test_reset_and_frequency() {
        let mut bank = OscillatorBank::new(Waveform::Triangle, 1000.0, 3).unwrap();
        assert_eq!(bank.frequency(), 0.0);
        let first = bank.tick(5.0);
        bank.tick(5.0);
        assert_eq!(bank.frequency(), 5.0);
        bank.reset();
        assert_eq!(bank.tick(5.0), first);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            OscillatorBank::new(Waveform::Square, 44100.0, 0).unwrap_err(),
            ConstructionError::NoPartials
        );
        assert!(matches!(
            OscillatorBank::new(Waveform::Pulse, 44100.0, 3),
            Err(ConstructionError::UnsupportedWaveform { .. })
        ));
        assert!(OscillatorBank::new(Waveform::Sine, 0.0, 3).is_err());
        assert_eq!(
            OscillatorBank::new(Waveform::Sine, 44100.0, 5)
                .unwrap()
                .partials(),
            &[(1.0, 1.0)]
        );
    }
}

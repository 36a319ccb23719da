//! Table lookup oscillator.

use std::sync::Arc;

use log::debug;

use super::Oscillator;
use super::accumulator::PhaseAccumulator;
use super::wavetable::Wavetable;
use crate::error::{self, ConstructionError};

/// How a [`TableOscillator`] reads between table samples.
///
/// All modes return the table sample itself when the phase lands exactly on
/// an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Sample at the integer part of the phase (fastest, adds quantization noise)
    Truncate,
    /// Straight line between the two surrounding samples
    #[default]
    Linear,
    /// 4-point Hermite cubic through the surrounding four samples
    Cubic,
}

/// Plays a shared [`Wavetable`] at any frequency.
///
/// The phase runs over `[0, table_size)` and advances by
/// `frequency * table_size / sample_rate` per tick. Any number of oscillators
/// may read the same table at once.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use siggen::{Interpolation, Oscillator, TableOscillator, Waveform, Wavetable};
///
/// let table = Arc::new(Wavetable::new(Waveform::Triangle, 1024, 16).unwrap());
/// let mut low = TableOscillator::new(48000.0, Arc::clone(&table)).unwrap();
/// let mut high = TableOscillator::new(48000.0, table)
///     .unwrap()
///     .with_interpolation(Interpolation::Cubic);
///
/// assert_eq!(low.tick(110.0), 1.0);
/// assert_eq!(high.tick(880.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct TableOscillator {
    table: Arc<Wavetable>,
    accumulator: PhaseAccumulator,
    interpolation: Interpolation,
}

impl TableOscillator {
    /// Creates an oscillator over `table` using linear interpolation.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidSampleRate`] unless the rate is
    /// finite and positive.
    pub fn new(sample_rate: f64, table: Arc<Wavetable>) -> Result<Self, ConstructionError> {
        let sample_rate = error::check_sample_rate(sample_rate)?;
        debug!(
            "table oscillator at {} Hz over {} samples",
            sample_rate,
            table.table_size()
        );
        Ok(Self {
            accumulator: PhaseAccumulator::new(table.table_size() as f64, sample_rate),
            table,
            interpolation: Interpolation::default(),
        })
    }

    /// Builder-style method to set the interpolation mode.
    pub fn with_interpolation(mut self, mode: Interpolation) -> Self {
        self.interpolation = mode;
        self
    }

    /// Starts playback `fraction` of a cycle into the table.
    pub fn with_phase(mut self, fraction: f64) -> Self {
        self.accumulator.set_start(fraction);
        self
    }

    pub fn set_interpolation(&mut self, mode: Interpolation) {
        self.interpolation = mode;
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn table(&self) -> &Arc<Wavetable> {
        &self.table
    }

    /// Current phase in table samples, in `[0, table_size)`.
    pub fn phase(&self) -> f64 {
        self.accumulator.phase()
    }

    #[inline]
    fn read(&self, phase: f64) -> f64 {
        let samples = self.table.samples();
        // Phase is wrapped into [0, table_size), so index + 2 is at most
        // the last guard sample
        let index = phase as usize;
        let fraction = phase - index as f64;

        match self.interpolation {
            Interpolation::Truncate => samples[index],
            Interpolation::Linear => {
                let value = samples[index];
                value + fraction * (samples[index + 1] - value)
            }
            Interpolation::Cubic => {
                let y0 = if index == 0 {
                    samples[self.table.table_size() - 1]
                } else {
                    samples[index - 1]
                };
                let y1 = samples[index];
                let y2 = samples[index + 1];
                let y3 = samples[index + 2];

                let c0 = y1;
                let c1 = 0.5 * (y2 - y0);
                let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
                let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);

                c0 + fraction * (c1 + fraction * (c2 + fraction * c3))
            }
        }
    }
}

impl Oscillator for TableOscillator {
    fn tick(&mut self, frequency: f64) -> f64 {
        let phase = self.accumulator.advance(frequency);
        self.read(phase)
    }

    fn frequency(&self) -> f64 {
        self.accumulator.frequency()
    }

    fn sample_rate(&self) -> f64 {
        self.accumulator.sample_rate()
    }

    fn reset(&mut self) {
        self.accumulator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Waveform;
    use std::f64::consts::TAU;

    const MODES: [Interpolation; 3] = [
        Interpolation::Truncate,
        Interpolation::Linear,
        Interpolation::Cubic,
    ];

    fn oscillator(table: &Arc<Wavetable>, sample_rate: f64, mode: Interpolation) -> TableOscillator {
        TableOscillator::new(sample_rate, Arc::clone(table))
            .unwrap()
            .with_interpolation(mode)
    }

    fn diamond() -> Arc<Wavetable> {
        Arc::new(Wavetable::from_samples(vec![0.0, 1.0, 0.0, -1.0]).unwrap())
    }

    #[test]
    fn test_modes_agree_at_integer_phase() {
        let table = Arc::new(Wavetable::new(Waveform::SawDown, 64, 20).unwrap());
        // 1 Hz at 64 Hz steps exactly one table sample per tick; 3 Hz skips
        for frequency in [1.0, 3.0, -5.0] {
            let outputs: Vec<Vec<f64>> = MODES
                .iter()
                .map(|&mode| {
                    let mut osc = oscillator(&table, 64.0, mode);
                    (0..200).map(|_| osc.tick(frequency)).collect()
                })
                .collect();
            assert_eq!(outputs[0], outputs[1], "truncate vs linear at {frequency} Hz");
            assert_eq!(outputs[0], outputs[2], "truncate vs cubic at {frequency} Hz");
        }
    }

    #[test]
    fn test_truncate_and_linear() {
        let table = diamond();
        let mut truncate = oscillator(&table, 8.0, Interpolation::Truncate);
        let mut linear = oscillator(&table, 8.0, Interpolation::Linear);
        let t: Vec<f64> = (0..8).map(|_| truncate.tick(1.0)).collect();
        let l: Vec<f64> = (0..8).map(|_| linear.tick(1.0)).collect();
        assert_eq!(t, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, -1.0, -1.0]);
        // The last value interpolates into the guard sample
        assert_eq!(l, vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5]);
    }

    #[test]
    fn test_cubic_wraps_left_neighbour() {
        let table = diamond();
        let mut start = oscillator(&table, 8.0, Interpolation::Cubic).with_phase(0.125);
        let mut middle = oscillator(&table, 8.0, Interpolation::Cubic).with_phase(0.625);
        assert_eq!(start.phase(), 0.5);
        assert_eq!(start.tick(0.0), 0.625);
        assert_eq!(middle.tick(0.0), -0.625);
    }

    #[test]
    fn test_cubic_beats_linear_on_sine() {
        let table = Arc::new(Wavetable::sine(64).unwrap());
        let (frequency, sample_rate) = (3.0, 1000.0);
        let max_error = |mode| {
            let mut osc = oscillator(&table, sample_rate, mode);
            (0..1000)
                .map(|k| {
                    let expected = (TAU * frequency * k as f64 / sample_rate).sin();
                    (osc.tick(frequency) - expected).abs()
                })
                .fold(0.0, f64::max)
        };
        let linear = max_error(Interpolation::Linear);
        let cubic = max_error(Interpolation::Cubic);
        assert!(linear < 2e-3, "linear error {linear}");
        assert!(cubic < linear / 10.0, "cubic {cubic} vs linear {linear}");
    }

    #[test]
    fn test_shared_table() {
        let table = diamond();
        let mut a = oscillator(&table, 4.0, Interpolation::Truncate);
        let mut b = oscillator(&table, 4.0, Interpolation::Truncate);
        a.tick(1.0);
        a.tick(1.0);
        assert_eq!(b.tick(1.0), 0.0);
        assert_eq!(a.tick(1.0), 0.0);
        assert_eq!(Arc::strong_count(&table), 3);
    }

    #[test]
    fn test_reset_and_frequency() {
        let table = diamond();
        let mut osc = oscillator(&table, 4.0, Interpolation::Linear).with_phase(0.25);
        assert_eq!(osc.tick(1.0), 1.0);
        assert_eq!(osc.frequency(), 1.0);
        osc.reset();
        assert_eq!(osc.phase(), 1.0);
        assert_eq!(osc.sample_rate(), 4.0);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(TableOscillator::new(-1.0, diamond()).is_err());
    }
}

//! Core trait definitions for oscillators.

use crate::signals::{Param, Signal};

/// Common interface for all phase-accumulator oscillators.
///
/// Frequency is an input to every tick rather than stored state, so a caller
/// can feed a constant, a breakpoint stream or any other control signal
/// sample by sample.
pub trait Oscillator {
    /// Returns the sample at the current phase, then advances the phase by
    /// one sample period at `frequency` Hz.
    ///
    /// Negative frequencies run the phase backwards.
    fn tick(&mut self, frequency: f64) -> f64;

    /// Gets the most recent frequency passed to [`tick`](Self::tick).
    ///
    /// # Returns
    ///
    /// Frequency in Hz, or 0.0 before the first tick
    fn frequency(&self) -> f64;

    /// Sample rate in Hz.
    fn sample_rate(&self) -> f64;

    /// Resets the oscillator to its initial phase.
    fn reset(&mut self);

    /// Fills `buffer` with consecutive samples at a fixed frequency.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency in Hz for every sample in the buffer
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, frequency: f64, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.tick(frequency);
        }
    }
}

/// Extension trait turning an oscillator into a [`Signal`].
pub trait OscillatorExt: Oscillator + Sized {
    /// Pairs the oscillator with a frequency source.
    ///
    /// The frequency is read once per sample, so a breakpoint stream passed
    /// here sweeps the pitch.
    ///
    /// # Examples
    ///
    /// ```
    /// use siggen::{BreakpointSet, BreakpointStream, OscillatorExt, Param, PhaseOscillator, Signal};
    ///
    /// let sweep: BreakpointSet = "0 220\n1 440".parse().unwrap();
    /// let frequency = BreakpointStream::new(sweep, 44100.0).unwrap();
    ///
    /// let mut tone = PhaseOscillator::sine(44100.0)
    ///     .unwrap()
    ///     .driven_by(Param::modulated(frequency));
    /// let mut buffer = vec![0.0; 256];
    /// tone.process(&mut buffer);
    /// assert_eq!(buffer[0], 0.0);
    /// ```
    fn driven_by(self, frequency: impl Into<Param>) -> Driven<Self> {
        Driven {
            oscillator: self,
            frequency: frequency.into(),
        }
    }
}

impl<O: Oscillator> OscillatorExt for O {}

/// An oscillator with an attached frequency parameter.
///
/// Created by [`OscillatorExt::driven_by`].
#[derive(Debug)]
pub struct Driven<O> {
    oscillator: O,
    frequency: Param,
}

impl<O> Driven<O> {
    pub fn oscillator(&self) -> &O {
        &self.oscillator
    }

    pub fn oscillator_mut(&mut self) -> &mut O {
        &mut self.oscillator
    }

    /// Splits the pair back into oscillator and frequency parameter.
    pub fn into_parts(self) -> (O, Param) {
        (self.oscillator, self.frequency)
    }
}

impl<O: Oscillator> Signal for Driven<O> {
    fn next_sample(&mut self) -> f64 {
        let frequency = self.frequency.value();
        self.oscillator.tick(frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreakpointSet, BreakpointStream, PhaseOscillator, Waveform};

    #[test]
    fn test_driven_by_fixed_frequency() {
        let mut direct = PhaseOscillator::new(Waveform::SawUp, 100.0).unwrap();
        let mut driven = PhaseOscillator::new(Waveform::SawUp, 100.0)
            .unwrap()
            .driven_by(5.0);
        for _ in 0..50 {
            assert_eq!(driven.next_sample(), direct.tick(5.0));
        }
        assert_eq!(driven.oscillator().frequency(), 5.0);
    }

    #[test]
    fn test_driven_by_stream() {
        // Frequency steps from 0 Hz to 20 Hz after the first second
        let set: BreakpointSet = "0 0\n1 0\n1 20\n2 20".parse().unwrap();
        let stream = BreakpointStream::new(set, 100.0).unwrap();
        let mut driven = PhaseOscillator::new(Waveform::Square, 100.0)
            .unwrap()
            .driven_by(Param::modulated(stream));

        let mut buffer = vec![0.0; 200];
        driven.process(&mut buffer);
        assert!(buffer[..100].iter().all(|&s| s == 1.0));
        // Five samples per cycle once the frequency jumps
        assert_eq!(&buffer[101..107], &[1.0, 1.0, 1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_process_default() {
        let mut osc = PhaseOscillator::new(Waveform::SawUp, 4.0).unwrap();
        let mut buffer = [0.0; 5];
        osc.process(1.0, &mut buffer);
        assert_eq!(buffer, [-1.0, -0.5, 0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_into_parts() {
        let driven = PhaseOscillator::sine(8.0).unwrap().driven_by(2.0);
        let (osc, frequency) = driven.into_parts();
        assert_eq!(osc.sample_rate(), 8.0);
        assert!(frequency.is_fixed());
    }
}

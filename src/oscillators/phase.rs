//! Analytic waveform oscillator.

use std::f64::consts::{PI, TAU};

use log::debug;

use super::Oscillator;
use super::accumulator::PhaseAccumulator;
use crate::Waveform;
use crate::error::{self, ConstructionError};

/// Generates a waveform by evaluating its formula at a running phase.
///
/// The phase runs over `[0, 2π)`. Each [`tick`](Oscillator::tick) reads the
/// waveform at the current phase and then advances it by
/// `frequency * 2π / sample_rate`.
///
/// Waveform values for a phase `p`:
///
/// | Waveform   | Value                                   |
/// |------------|-----------------------------------------|
/// | `Sine`     | `sin(p)`                                |
/// | `Square`   | `1` if `p <= π`, else `-1`              |
/// | `SawUp`    | `2 * p / 2π - 1`                        |
/// | `SawDown`  | `1 - 2 * p / 2π`                        |
/// | `Triangle` | `2 * (abs(2 * p / 2π - 1) - 0.5)`       |
/// | `Pulse`    | `1` if `p <= width * 2π`, else `-1`     |
///
/// The analytic shapes other than sine contain every harmonic and alias at
/// high frequencies; use a [`TableOscillator`](super::TableOscillator) or an
/// [`OscillatorBank`](super::OscillatorBank) for band-limited output.
///
/// # Examples
///
/// ```
/// use siggen::{Oscillator, PhaseOscillator};
///
/// let mut osc = PhaseOscillator::sine(4.0).unwrap();
/// let samples: Vec<f64> = (0..4).map(|_| osc.tick(1.0)).collect();
/// assert!((samples[1] - 1.0).abs() < 1e-12);
/// assert!((samples[3] + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseOscillator {
    waveform: Waveform,
    accumulator: PhaseAccumulator,
    /// Fraction of the cycle spent high, used by `Pulse`
    pulse_width: f64,
}

impl PhaseOscillator {
    /// Creates an oscillator for `waveform` at `sample_rate` Hz.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidSampleRate`] unless the rate is
    /// finite and positive.
    pub fn new(waveform: Waveform, sample_rate: f64) -> Result<Self, ConstructionError> {
        let sample_rate = error::check_sample_rate(sample_rate)?;
        debug!("{waveform} oscillator at {sample_rate} Hz");
        Ok(Self {
            waveform,
            accumulator: PhaseAccumulator::new(TAU, sample_rate),
            pulse_width: 0.5,
        })
    }

    /// Creates a sine oscillator.
    pub fn sine(sample_rate: f64) -> Result<Self, ConstructionError> {
        Self::new(Waveform::Sine, sample_rate)
    }

    /// Starts the oscillator `fraction` of a cycle into its waveform.
    ///
    /// A quarter cycle turns a sine into a cosine. Reset returns to this
    /// phase.
    pub fn with_phase(mut self, fraction: f64) -> Self {
        self.accumulator.set_start(fraction);
        self
    }

    /// Sets the initial pulse width for `Pulse`, clamped to `[0, 1]`.
    pub fn with_pulse_width(mut self, width: f64) -> Self {
        self.set_pulse_width(width);
        self
    }

    pub fn set_pulse_width(&mut self, width: f64) {
        // NaN keeps the previous width
        if !width.is_nan() {
            self.pulse_width = width.clamp(0.0, 1.0);
        }
    }

    pub fn pulse_width(&self) -> f64 {
        self.pulse_width
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current phase in radians, in `[0, 2π)`.
    pub fn phase(&self) -> f64 {
        self.accumulator.phase()
    }

    /// Ticks with a new pulse width.
    ///
    /// The width is a control input like frequency, so a breakpoint stream
    /// can sweep it. It is clamped to `[0, 1]` and stays in effect for later
    /// calls to [`tick`](Oscillator::tick). Other waveforms ignore it.
    ///
    /// # Examples
    ///
    /// ```
    /// use siggen::{PhaseOscillator, Waveform};
    ///
    /// let mut osc = PhaseOscillator::new(Waveform::Pulse, 8.0).unwrap();
    /// let samples: Vec<f64> = (0..8).map(|_| osc.tick_pwm(1.0, 0.25)).collect();
    /// assert_eq!(samples, vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0]);
    /// ```
    pub fn tick_pwm(&mut self, frequency: f64, pulse_width: f64) -> f64 {
        self.set_pulse_width(pulse_width);
        self.tick(frequency)
    }

    fn value(&self, phase: f64) -> f64 {
        match self.waveform {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                if phase <= PI {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::SawUp => 2.0 * (phase / TAU) - 1.0,
            Waveform::SawDown => 1.0 - 2.0 * (phase / TAU),
            Waveform::Triangle => {
                let t = (2.0 * (phase / TAU) - 1.0).abs();
                2.0 * (t - 0.5)
            }
            Waveform::Pulse => {
                if phase <= self.pulse_width * TAU {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

impl Oscillator for PhaseOscillator {
    fn tick(&mut self, frequency: f64) -> f64 {
        let phase = self.accumulator.advance(frequency);
        self.value(phase)
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

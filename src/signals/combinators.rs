//! Signal combinators for scaling and mixing generated signals.
//!
//! These are the pieces a buffer-fill loop uses between an oscillator and the
//! output: amplitude scaling (fixed or breakpoint-driven), DC offsets,
//! sums of sources and clipping.

use super::{Param, Signal};

/// Multiplies two signals together (amplitude or ring modulation).
///
/// # Examples
///
/// ```
/// use siggen::{Signal, signals::Multiply};
///
/// let mut product = Multiply::new(2.0, 3.0);
/// assert_eq!(product.next_sample(), 6.0);
/// ```
pub struct Multiply<A: Signal, B: Signal> {
    a: A,
    b: B,
}

impl<A: Signal, B: Signal> Multiply<A, B> {
    /// Creates a new Multiply combinator.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Signal, B: Signal> Signal for Multiply<A, B> {
    fn next_sample(&mut self) -> f64 {
        self.a.next_sample() * self.b.next_sample()
    }
}

/// Adds two signals together (mixing).
///
/// Sums can exceed [-1, 1]; scale the inputs with [`Gain`] first.
pub struct Add<A: Signal, B: Signal> {
    a: A,
    b: B,
}

impl<A: Signal, B: Signal> Add<A, B> {
    /// Creates a new Add combinator.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Signal, B: Signal> Signal for Add<A, B> {
    fn next_sample(&mut self) -> f64 {
        self.a.next_sample() + self.b.next_sample()
    }
}

/// Scales a signal by a fixed or modulated factor.
///
/// # Examples
///
/// ```
/// use siggen::{Signal, signals::Gain};
///
/// let mut quieter = Gain { source: 0.8, gain: 0.5.into() };
/// assert_eq!(quieter.next_sample(), 0.4);
/// ```
pub struct Gain<S: Signal> {
    pub source: S,
    pub gain: Param,
}

impl<S: Signal> Signal for Gain<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.gain.value()
    }
}

/// Adds a fixed or modulated offset to a signal.
pub struct Offset<S: Signal> {
    pub source: S,
    pub offset: Param,
}

impl<S: Signal> Signal for Offset<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() + self.offset.value()
    }
}

/// Clamps a signal into `[min, max]`.
pub struct Clamp<S: Signal> {
    pub source: S,
    pub min: f64,
    pub max: f64,
}

impl<S: Signal> Signal for Clamp<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample().clamp(self.min, self.max)
    }
}

/// Applies a function to every sample of a signal.
pub struct Map<S: Signal, F>
where
    F: FnMut(f64) -> f64,
{
    pub source: S,
    pub func: F,
}

impl<S: Signal, F> Signal for Map<S, F>
where
    F: FnMut(f64) -> f64,
{
    fn next_sample(&mut self) -> f64 {
        (self.func)(self.source.next_sample())
    }
}

/// Extension trait providing a fluent API for chaining signal operations.
///
/// # Examples
///
/// ```
/// use siggen::{BreakpointStream, OscillatorExt, PhaseOscillator, Signal, SignalExt};
///
/// let amplitude = BreakpointStream::new("0 0\n1 1".parse().unwrap(), 44100.0).unwrap();
/// let mut tone = PhaseOscillator::sine(44100.0)
///     .unwrap()
///     .driven_by(440.0)
///     .gain(amplitude)
///     .clamp(-1.0, 1.0);
///
/// let mut buffer = vec![0.0; 64];
/// tone.process(&mut buffer);
/// assert_eq!(buffer[0], 0.0);
/// ```
pub trait SignalExt: Signal + Sized {
    /// Multiplies this signal with another signal.
    fn multiply<S: Signal>(self, other: S) -> Multiply<Self, S> {
        Multiply { a: self, b: other }
    }

    /// Adds this signal to another signal.
    fn add<S: Signal>(self, other: S) -> Add<Self, S> {
        Add { a: self, b: other }
    }

    /// Applies a gain factor to this signal.
    fn gain(self, gain: impl Into<Param>) -> Gain<Self> {
        Gain {
            source: self,
            gain: gain.into(),
        }
    }

    /// Adds an offset to this signal.
    fn offset(self, offset: impl Into<Param>) -> Offset<Self> {
        Offset {
            source: self,
            offset: offset.into(),
        }
    }

    /// Clamps this signal to a range.
    fn clamp(self, min: f64, max: f64) -> Clamp<Self> {
        Clamp {
            source: self,
            min,
            max,
        }
    }

    /// Applies a function to each sample of this signal.
    fn map<F>(self, func: F) -> Map<Self, F>
    where
        F: FnMut(f64) -> f64,
    {
        Map { source: self, func }
    }
}

impl<T: Signal> SignalExt for T {}

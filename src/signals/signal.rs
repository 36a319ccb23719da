//! Core signal trait and parameter type.
//!
//! A `Signal` produces one value per call and carries its own state forward,
//! so samples must be requested strictly in time order.

/// Common interface for all control and audio signal sources.
///
/// Breakpoint streams, driven oscillators and combinators all implement this
/// trait. Each call advances the source by exactly one sample period.
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// The value at the current position, before advancing
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A constant signal.
///
/// # Examples
///
/// ```
/// use siggen::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }
}

/// A parameter that is either a fixed value or driven by a signal.
///
/// Frequency, amplitude and pan inputs all accept a `Param`, so the same call
/// site works with a constant or with a breakpoint stream.
///
/// # Examples
///
/// ```
/// use siggen::{BreakpointSet, BreakpointStream, Param};
///
/// let mut fixed: Param = 440.0.into();
/// assert_eq!(fixed.value(), 440.0);
///
/// let set: BreakpointSet = "0 100\n1 200".parse().unwrap();
/// let stream = BreakpointStream::new(set, 10.0).unwrap();
/// let mut automated = Param::modulated(stream);
/// assert_eq!(automated.value(), 100.0);
/// assert!((automated.value() - 110.0).abs() < 1e-9);
/// ```
pub enum Param {
    /// A fixed, constant value
    Fixed(f64),
    /// A value produced by a signal source, advanced once per read
    Signal(Box<dyn Signal + Send>),
}

impl Param {
    /// Gets the current value of the parameter.
    ///
    /// For modulated parameters this advances the source by one sample.
    pub fn value(&mut self) -> f64 {
        match self {
            Param::Fixed(v) => *v,
            Param::Signal(s) => s.next_sample(),
        }
    }

    /// Creates a fixed parameter.
    pub fn fixed(value: f64) -> Self {
        Param::Fixed(value)
    }

    /// Creates a parameter driven by a signal source.
    pub fn modulated(signal: impl Signal + Send + 'static) -> Self {
        Param::Signal(Box::new(signal))
    }

    /// Returns true if this parameter is fixed.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Param::Fixed(_))
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Param::Signal(_) => f.write_str("Signal(..)"),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}

impl From<crate::BreakpointStream> for Param {
    fn from(stream: crate::BreakpointStream) -> Self {
        Param::Signal(Box::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_param() {
        let param: Param = 0.5.into();
        match param {
            Param::Fixed(v) => assert_eq!(v, 0.5),
            Param::Signal(_) => panic!("Expected Fixed, got Signal"),
        }
    }

    #[test]
    fn test_modulated_param_advances() {
        struct Counter(f64);
        impl Signal for Counter {
            fn next_sample(&mut self) -> f64 {
                self.0 += 1.0;
                self.0
            }
        }

        let mut param = Param::modulated(Counter(0.0));
        assert!(!param.is_fixed());
        assert_eq!(param.value(), 1.0);
        assert_eq!(param.value(), 2.0);
    }

    #[test]
    fn test_boxed_signal() {
        let mut boxed: Box<dyn Signal> = Box::new(0.25);
        assert_eq!(boxed.next_sample(), 0.25);
    }
}

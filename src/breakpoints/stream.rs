//! Sample-rate breakpoint streaming.

use std::io::BufRead;

use log::{debug, trace};

use super::set::{Breakpoint, BreakpointSet};
use crate::error::{self, ConstructionError};
use crate::signals::Signal;

/// Converts a breakpoint set into a dense control signal, one value per tick.
///
/// The stream owns its set and a cursor over it. Each [`tick`](Self::tick)
/// returns the linearly interpolated value at the current position and then
/// moves the position forward by one sample period. Position only advances;
/// once it passes the final breakpoint the stream holds the last value
/// forever.
///
/// # Examples
///
/// ```
/// use siggen::{BreakpointSet, BreakpointStream};
///
/// let set = BreakpointSet::parse(["0 0", "1 1"]).unwrap();
/// let mut stream = BreakpointStream::new(set, 4.0).unwrap();
///
/// let values: Vec<f64> = (0..4).map(|_| stream.tick()).collect();
/// assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
/// ```
#[derive(Debug, Clone)]
pub struct BreakpointStream {
    set: BreakpointSet,
    /// Index of the right point of the active span
    right_index: usize,
    left: Breakpoint,
    right: Breakpoint,
    width: f64,
    height: f64,
    /// Samples produced so far; position is derived from it to avoid drift
    ticks: u64,
    position: f64,
    sample_rate: f64,
    exhausted: bool,
}

impl BreakpointStream {
    /// Creates a stream over `set` producing values at `sample_rate` Hz.
    ///
    /// # Errors
    ///
    /// * [`ConstructionError::InvalidSampleRate`] - rate is zero, negative or
    ///   not finite
    /// * [`ConstructionError::TooFewBreakpoints`] - the set has no span
    pub fn new(set: BreakpointSet, sample_rate: f64) -> Result<Self, ConstructionError> {
        let sample_rate = error::check_sample_rate(sample_rate)?;
        if set.len() < 2 {
            return Err(ConstructionError::TooFewBreakpoints { count: set.len() });
        }

        let points = set.points();
        let (left, right) = (points[0], points[1]);
        debug!(
            "breakpoint stream: {} points over {}s at {} Hz",
            set.len(),
            set.duration(),
            sample_rate
        );
        Ok(Self {
            right_index: 1,
            left,
            right,
            width: right.time - left.time,
            height: right.value - left.value,
            ticks: 0,
            position: 0.0,
            sample_rate,
            exhausted: false,
            set,
        })
    }

    /// Reads a breakpoint file and creates a stream over it.
    pub fn from_reader<R: BufRead>(reader: R, sample_rate: f64) -> error::Result<Self> {
        let set = BreakpointSet::from_reader(reader)?;
        Ok(Self::new(set, sample_rate)?)
    }

    /// Returns the value at the current position, then advances one sample.
    pub fn tick(&mut self) -> f64 {
        if self.exhausted {
            return self.right.value;
        }

        let value = if self.width == 0.0 {
            self.right.value
        } else if self.position < self.left.time {
            self.left.value
        } else {
            let fraction = (self.position - self.left.time) / self.width;
            self.left.value + self.height * fraction
        };

        self.ticks += 1;
        self.position = self.ticks as f64 / self.sample_rate;
        while self.position > self.right.time {
            if !self.next_span() {
                self.exhausted = true;
                trace!("breakpoint stream exhausted at {}s", self.position);
                break;
            }
        }

        value
    }

    fn next_span(&mut self) -> bool {
        let points = self.set.points();
        if self.right_index + 1 >= points.len() {
            return false;
        }
        self.right_index += 1;
        self.left = points[self.right_index - 1];
        self.right = points[self.right_index];
        self.width = self.right.time - self.left.time;
        self.height = self.right.value - self.left.value;
        trace!(
            "span {} -> {}s..{}s",
            self.right_index, self.left.time, self.right.time
        );
        true
    }

    /// Current time in seconds (the time of the next value returned).
    pub fn position(&self) -> f64 {
        self.position
    }

    /// True once the position has passed the final breakpoint.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn set(&self) -> &BreakpointSet {
        &self.set
    }

    /// Gives the breakpoint set back, discarding the cursor.
    pub fn into_set(self) -> BreakpointSet {
        self.set
    }

    /// Number of ticks needed to cover the whole set, rounded to the nearest
    /// sample.
    pub fn duration_samples(&self) -> u64 {
        (self.set.duration() * self.sample_rate).round() as u64
    }
}

impl Signal for BreakpointStream {
    fn next_sample(&mut self) -> f64 {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn stream(text: &str, sample_rate: f64) -> BreakpointStream {
        BreakpointStream::new(text.parse().unwrap(), sample_rate).unwrap()
    }

    #[test]
    fn test_quarter_steps() {
        let mut s = stream("0 0\n1 1", 4.0);
        assert_eq!(s.tick(), 0.0);
        assert_eq!(s.tick(), 0.25);
        assert_eq!(s.tick(), 0.5);
        assert_eq!(s.tick(), 0.75);
        assert!(!s.is_exhausted());
        assert_eq!(s.tick(), 1.0);
        assert!(s.is_exhausted());
    }

    #[test]
    fn test_single_span_is_linear() {
        let (v0, v1, t1, sr) = (3.0, -2.0, 2.5, 1000.0);
        let mut s = stream(&format!("0 {v0}\n{t1} {v1}"), sr);
        let steps = (t1 * sr) as usize;
        for k in 0..steps {
            let expected = v0 + (v1 - v0) * k as f64 / (t1 * sr);
            let value = s.tick();
            assert!((value - expected).abs() < EPSILON, "step {k}: {value} vs {expected}");
        }
    }

    #[test]
    fn test_holds_last_value() {
        let mut s = stream("0 0\n0.5 1\n1 0.25", 10.0);
        for _ in 0..11 {
            s.tick();
        }
        assert!(s.is_exhausted());
        for _ in 0..100 {
            assert_eq!(s.tick(), 0.25);
        }
    }

    #[test]
    fn test_multiple_spans() {
        let mut s = stream("0 0\n1 10\n3 0", 2.0);
        let values: Vec<f64> = (0..8).map(|_| s.tick()).collect();
        assert_eq!(values, vec![0.0, 5.0, 10.0, 7.5, 5.0, 2.5, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_width_span_jumps() {
        // Step from 0 to 1 at t = 1
        let mut s = stream("0 0\n1 0\n1 1\n2 1", 2.0);
        let values: Vec<f64> = (0..5).map(|_| s.tick()).collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_zero_width_first_span_advances() {
        let mut s = stream("0 5\n0 1\n1 1", 4.0);
        assert_eq!(s.tick(), 1.0);
        assert_eq!(s.tick(), 1.0);
        assert!(s.position() > 0.0);
    }

    #[test]
    fn test_spans_shorter_than_a_sample() {
        let mut s = stream("0 0\n0.01 1\n0.02 2\n0.03 3\n1 3", 10.0);
        assert_eq!(s.tick(), 0.0);
        // Three short spans are skipped within one sample period
        assert!((s.tick() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_late_first_point_holds_first_value() {
        let mut s = stream("0.5 2\n1 4", 4.0);
        assert_eq!(s.tick(), 2.0);
        assert_eq!(s.tick(), 2.0);
        assert_eq!(s.tick(), 2.0);
        assert_eq!(s.tick(), 3.0);
    }

    #[test]
    fn test_independent_streams() {
        let set: BreakpointSet = "0 0\n1 1".parse().unwrap();
        let mut a = BreakpointStream::new(set.clone(), 4.0).unwrap();
        let mut b = BreakpointStream::new(set, 4.0).unwrap();
        a.tick();
        a.tick();
        assert_eq!(b.tick(), 0.0);
        assert_eq!(a.tick(), 0.5);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let set: BreakpointSet = "0 0\n1 1".parse().unwrap();
        assert_eq!(
            BreakpointStream::new(set, 0.0).unwrap_err(),
            ConstructionError::InvalidSampleRate { sample_rate: 0.0 }
        );
    }

    #[test]
    fn test_from_reader() {
        let mut s = BreakpointStream::from_reader("0 1\n1 1\n".as_bytes(), 100.0).unwrap();
        assert_eq!(s.tick(), 1.0);
        assert_eq!(s.duration_samples(), 100);

        let err = BreakpointStream::from_reader("0 1\n".as_bytes(), 100.0).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Parse(crate::ParseError::TooFewPoints { count: 1 })
        ));
    }

    #[test]
    fn test_process_buffer() {
        let mut s = stream("0 0\n1 1", 8.0);
        let mut buffer = [0.0; 10];
        s.process(&mut buffer);
        assert_eq!(buffer[4], 0.5);
        assert_eq!(buffer[9], 1.0);
    }
}

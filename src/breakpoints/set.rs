//! Breakpoint data and its text format.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use log::{debug, warn};

use super::cursor::BreakpointCursor;
use crate::error::ParseError;

/// A single `(time, value)` control point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Breakpoint {
    /// Time in seconds
    pub time: f64,
    pub value: f64,
}

impl Breakpoint {
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Breakpoint {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

/// Linear interpolation across the span `left..=right`.
///
/// A zero-width span yields the right value.
#[inline]
pub(crate) fn interpolate(left: Breakpoint, right: Breakpoint, time: f64) -> f64 {
    let width = right.time - left.time;
    if width == 0.0 {
        return right.value;
    }
    let fraction = (time - left.time) / width;
    left.value + (right.value - left.value) * fraction
}

/// An immutable, time-ordered sequence of breakpoints.
///
/// Every set holds at least two points with non-negative, non-decreasing
/// times, so it always describes at least one span.
///
/// # Text format
///
/// One breakpoint per line, time then value, separated by whitespace:
///
/// ```text
/// 0.0   0.0
/// 0.5   1.0
/// 2.0   0.25
/// ```
///
/// # Examples
///
/// ```
/// use siggen::BreakpointSet;
///
/// let set = BreakpointSet::parse(["0 0", "0.5 1", "2 0.25"]).unwrap();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.duration(), 2.0);
/// assert_eq!(set.value_at(0.25), 0.5);
/// assert_eq!(set.min_max(), (0.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointSet {
    points: Vec<Breakpoint>,
}

impl BreakpointSet {
    /// Parses breakpoints from lines of text.
    ///
    /// Parsing stops at the first malformed line and the whole input is
    /// rejected; a partial file never yields partial automation.
    ///
    /// # Errors
    ///
    /// * [`ParseError::NonNumeric`] - a line does not start with a number, or a
    ///   blank line separates two data lines
    /// * [`ParseError::IncompletePair`] - a line holds a time but no value
    /// * [`ParseError::NotIncreasing`] - a time is earlier than the previous one
    /// * [`ParseError::TooFewPoints`] - fewer than two breakpoints were read
    pub fn parse<I, S>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = LineParser::default();
        for line in lines {
            parser.feed(line.as_ref())?;
        }
        parser.finish()
    }

    /// Reads and parses breakpoints from a buffered reader (e.g. an open file).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut parser = LineParser::default();
        for line in reader.lines() {
            parser.feed(&line?)?;
        }
        parser.finish()
    }

    /// Builds a set from points already in memory, applying the same ordering
    /// rules as the text parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use siggen::{Breakpoint, BreakpointSet};
    ///
    /// let set = BreakpointSet::from_points(vec![(0.0, 1.0).into(), (1.0, 0.0).into()]).unwrap();
    /// assert_eq!(set.last(), Breakpoint::new(1.0, 0.0));
    ///
    /// assert!(BreakpointSet::from_points(vec![(1.0, 0.0).into(), (0.5, 1.0).into()]).is_err());
    /// ```
    pub fn from_points(points: Vec<Breakpoint>) -> Result<Self, ParseError> {
        let mut previous = 0.0;
        for (index, point) in points.iter().enumerate() {
            let line = index + 1;
            if !point.time.is_finite() || !point.value.is_finite() {
                return Err(ParseError::NonNumeric { line });
            }
            if point.time < previous {
                return Err(ParseError::NotIncreasing {
                    line,
                    time: point.time,
                    previous,
                });
            }
            previous = point.time;
        }
        if points.len() < 2 {
            return Err(ParseError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Wraps points that were validated at compile time by `breakpoints!`.
    #[doc(hidden)]
    pub fn __from_validated(points: Vec<Breakpoint>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    /// Wraps points the crate generated itself in time order.
    pub(crate) fn from_ordered(points: Vec<Breakpoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time <= w[1].time));
        Self { points }
    }

    /// Number of breakpoints (always at least 2).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Breakpoint {
        self.points[0]
    }

    pub fn last(&self) -> Breakpoint {
        self.points[self.points.len() - 1]
    }

    /// Time of the final breakpoint.
    pub fn duration(&self) -> f64 {
        self.last().time
    }

    /// Smallest and largest breakpoint values.
    pub fn min_max(&self) -> (f64, f64) {
        let first = self.points[0].value;
        self.points[1..]
            .iter()
            .fold((first, first), |(min, max), p| (min.min(p.value), max.max(p.value)))
    }

    /// Returns true if every value lies within `[min, max]`.
    ///
    /// Callers use this to validate automation before using it as, say, a pan
    /// position or amplitude.
    pub fn in_range(&self, min: f64, max: f64) -> bool {
        self.points.iter().all(|p| p.value >= min && p.value <= max)
    }

    /// Value of the curve at `time`, found by binary search.
    ///
    /// Before the first point the first value is returned; after the last
    /// point the last value is held. For many queries in time order use
    /// [`BreakpointSet::cursor`] instead.
    pub fn value_at(&self, time: f64) -> f64 {
        let points = &self.points;
        if time < points[0].time {
            return points[0].value;
        }
        let right = points.partition_point(|p| p.time < time).max(1);
        if right == points.len() {
            return self.last().value;
        }
        interpolate(points[right - 1], points[right], time)
    }

    /// Creates a lookup cursor with its own search position.
    pub fn cursor(&self) -> BreakpointCursor<'_> {
        BreakpointCursor::new(self)
    }
}

impl<'a> IntoIterator for &'a BreakpointSet {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromStr for BreakpointSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.lines())
    }
}

/// Writes the set back out in the text format, one `time<TAB>value` per line.
impl fmt::Display for BreakpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.points {
            writeln!(f, "{}\t{}", point.time, point.value)?;
        }
        Ok(())
    }
}

/// Incremental line-by-line parser state.
#[derive(Default)]
struct LineParser {
    points: Vec<Breakpoint>,
    line: usize,
    /// Line number of a blank line seen after data, if any
    blank_line: Option<usize>,
}

impl LineParser {
    fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        self.line += 1;
        let mut tokens = text.split_whitespace();

        let Some(first) = tokens.next() else {
            if !self.points.is_empty() && self.blank_line.is_none() {
                self.blank_line = Some(self.line);
            }
            return Ok(());
        };

        if let Some(line) = self.blank_line {
            return Err(self.fail(ParseError::NonNumeric { line }));
        }

        let line = self.line;
        let time = match parse_number(first) {
            Some(time) => time,
            None => return Err(self.fail(ParseError::NonNumeric { line })),
        };
        let value = match tokens.next() {
            None => return Err(self.fail(ParseError::IncompletePair { line })),
            Some(token) => match token.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                Ok(_) => return Err(self.fail(ParseError::NonNumeric { line })),
                Err(_) => return Err(self.fail(ParseError::IncompletePair { line })),
            },
        };

        let previous = self.points.last().map_or(0.0, |p| p.time);
        if time < previous {
            return Err(self.fail(ParseError::NotIncreasing {
                line,
                time,
                previous,
            }));
        }

        self.points.push(Breakpoint { time, value });
        Ok(())
    }

    fn finish(self) -> Result<BreakpointSet, ParseError> {
        if self.points.len() < 2 {
            let err = ParseError::TooFewPoints {
                count: self.points.len(),
            };
            warn!("{err}");
            return Err(err);
        }
        debug!("parsed {} breakpoints over {} lines", self.points.len(), self.line);
        Ok(BreakpointSet {
            points: self.points,
        })
    }

    fn fail(&self, err: ParseError) -> ParseError {
        warn!("breakpoint parse aborted after {} points: {err}", self.points.len());
        err
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

//! Point-in-time lookup over a breakpoint set.

use super::set::{Breakpoint, BreakpointSet, interpolate};

/// Looks up curve values at arbitrary times, remembering where the last
/// lookup landed.
///
/// Each cursor owns its search position, so several cursors over the same or
/// different sets never disturb each other. Queries in non-decreasing time
/// order cost amortized O(1); a query earlier than the current span falls
/// back to a binary search and remains correct.
///
/// # Examples
///
/// ```
/// use siggen::BreakpointSet;
///
/// let pan: BreakpointSet = "0 -1\n2 1".parse().unwrap();
/// let mut cursor = pan.cursor();
/// assert_eq!(cursor.value_at(0.0), -1.0);
/// assert_eq!(cursor.value_at(1.0), 0.0);
/// assert_eq!(cursor.value_at(5.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct BreakpointCursor<'a> {
    points: &'a [Breakpoint],
    /// Index of the right point of the active span
    right: usize,
}

impl<'a> BreakpointCursor<'a> {
    pub fn new(set: &'a BreakpointSet) -> Self {
        Self {
            points: set.points(),
            right: 1,
        }
    }

    /// Value of the curve at `time`.
    ///
    /// Holds the first value before the first point and the last value after
    /// the last point.
    pub fn value_at(&mut self, time: f64) -> f64 {
        let points = self.points;
        if time < points[0].time {
            return points[0].value;
        }

        if self.right > 1 && time <= points[self.right - 1].time {
            self.right = points.partition_point(|p| p.time < time).max(1);
        }
        while self.right < points.len() && time > points[self.right].time {
            self.right += 1;
        }

        match points.get(self.right) {
            Some(&right) => interpolate(points[self.right - 1], right, time),
            None => points[points.len() - 1].value,
        }
    }

    /// Returns the cursor to the first span.
    pub fn reset(&mut self) {
        self.right = 1;
    }
}

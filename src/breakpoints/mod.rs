//! Breakpoint automation: parsing, streaming and lookup.
//!
//! A breakpoint file describes a piecewise-linear control curve as sparse
//! `(time, value)` pairs. This module provides:
//! - `BreakpointSet` - validated, immutable point data and its text format
//! - `BreakpointStream` - per-sample interpolation at a fixed sample rate
//! - `BreakpointCursor` - point-in-time lookups with a per-cursor search index
//! - `extract_envelope` - builds a set from the peak level of a sample block

mod cursor;
mod envelope;
mod set;
mod stream;

pub use cursor::BreakpointCursor;
pub use envelope::{DEFAULT_WINDOW, extract_envelope, peak};
pub use set::{Breakpoint, BreakpointSet};
pub use stream::BreakpointStream;

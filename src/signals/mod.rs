//! Signal processing types and traits.
//!
//! This module provides the core abstractions shared by breakpoint streams and
//! oscillators:
//! - `Signal` trait for anything producing one sample per tick
//! - `Param` type for fixed or modulated parameters
//! - `SignalExt` combinators for scaling and mixing signals

pub mod combinators;
mod signal;

pub use combinators::{Add, Clamp, Gain, Map, Multiply, Offset, SignalExt};
pub use signal::{Param, Signal};

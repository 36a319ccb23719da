//! Stereo panning gains.

use std::f64::consts::FRAC_PI_4;

use crate::Signal;

/// Left and right channel gains for one pan position.
///
/// Positions run from -1.0 (hard left) through 0.0 (centre) to 1.0 (hard
/// right). Positions outside that range are clamped.
///
/// # Examples
///
/// ```
/// use siggen::PanPosition;
///
/// let centre = PanPosition::constant_power(0.0);
/// assert!((centre.left - centre.right).abs() < 1e-12);
///
/// let (left, right) = PanPosition::simple(1.0).apply(0.8);
/// assert_eq!((left, right), (0.0, 0.8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanPosition {
    pub left: f64,
    pub right: f64,
}

impl PanPosition {
    /// Linear crossfade between the channels.
    ///
    /// The gains always sum to 1.0, which makes a centred source sound
    /// quieter than a hard-panned one.
    pub fn simple(position: f64) -> Self {
        let half = clamp_position(position) * 0.5;
        Self {
            left: 0.5 - half,
            right: 0.5 + half,
        }
    }

    /// Constant-power pan law.
    ///
    /// The squared gains always sum to 1.0, so perceived loudness stays the
    /// same across the stereo field. Each channel is at `sqrt(2)/2` in the
    /// centre.
    pub fn constant_power(position: f64) -> Self {
        let angle = clamp_position(position) * FRAC_PI_4;
        let (sin, cos) = angle.sin_cos();
        let root2_over2 = std::f64::consts::FRAC_1_SQRT_2;
        Self {
            left: root2_over2 * (cos - sin),
            right: root2_over2 * (cos + sin),
        }
    }

    /// Splits a mono sample into a `(left, right)` pair.
    pub fn apply(&self, sample: f64) -> (f64, f64) {
        (sample * self.left, sample * self.right)
    }
}

impl Default for PanPosition {
    fn default() -> Self {
        Self::constant_power(0.0)
    }
}

fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(-1.0, 1.0)
    }
}

/// Pans a mono signal with a position signal, one frame per call.
///
/// Typically the position comes from a [`BreakpointStream`](crate::BreakpointStream)
/// sweeping between -1.0 and 1.0.
pub fn pan_frame<S: Signal, P: Signal>(source: &mut S, position: &mut P) -> (f64, f64) {
    let sample = source.next_sample();
    PanPosition::constant_power(position.next_sample()).apply(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreakpointSet, BreakpointStream};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_simple_gains() {
        assert_eq!(PanPosition::simple(-1.0), PanPosition { left: 1.0, right: 0.0 });
        assert_eq!(PanPosition::simple(0.0), PanPosition { left: 0.5, right: 0.5 });
        assert_eq!(PanPosition::simple(0.5), PanPosition { left: 0.25, right: 0.75 });
    }

    #[test]
    fn test_constant_power() {
        for i in 0..=20 {
            let position = -1.0 + i as f64 * 0.1;
            let pan = PanPosition::constant_power(position);
            assert!((pan.left.powi(2) + pan.right.powi(2) - 1.0).abs() < EPSILON);
            assert!(pan.left >= -EPSILON && pan.right >= -EPSILON);
        }
        let hard_left = PanPosition::constant_power(-1.0);
        assert!((hard_left.left - 1.0).abs() < EPSILON);
        assert!(hard_left.right.abs() < EPSILON);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(PanPosition::simple(3.0), PanPosition::simple(1.0));
        assert_eq!(PanPosition::constant_power(-7.0), PanPosition::constant_power(-1.0));
        assert_eq!(PanPosition::simple(f64::NAN), PanPosition::simple(0.0));
    }

    #[test]
    fn test_pan_frame_follows_stream() {
        let set: BreakpointSet = "0 -1\n1 1".parse().unwrap();
        let mut position = BreakpointStream::new(set, 2.0).unwrap();
        let mut source = 1.0_f64;

        let (l0, r0) = pan_frame(&mut source, &mut position);
        assert!((l0 - 1.0).abs() < EPSILON && r0.abs() < EPSILON);
        let (l1, r1) = pan_frame(&mut source, &mut position);
        assert!((l1 - r1).abs() < EPSILON);
        let (l2, r2) = pan_frame(&mut source, &mut position);
        assert!(l2.abs() < EPSILON && (r2 - 1.0).abs() < EPSILON);
    }
}

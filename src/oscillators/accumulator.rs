//! Phase accumulator shared by the analytic and table oscillators.

/// Wraps `phase` into `[0, cycle)`.
///
/// Small overshoots (the usual case, one increment past the end) are folded
/// by repeated subtraction or addition. Larger excursions from very high or
/// negative frequencies fall back to a euclidean remainder. Non-finite phases
/// restart the cycle at zero.
pub(crate) fn wrap(mut phase: f64, cycle: f64) -> f64 {
    if !phase.is_finite() {
        return 0.0;
    }
    if phase.abs() >= 4.0 * cycle {
        phase = phase.rem_euclid(cycle);
    }
    while phase >= cycle {
        phase -= cycle;
    }
    while phase < 0.0 {
        phase += cycle;
    }
    // -tiny + cycle can round up to exactly cycle
    if phase >= cycle { 0.0 } else { phase }
}

/// Phase state for one oscillator.
///
/// The cycle length is 2π for analytic waveforms and the table length for
/// table lookup; everything else is identical. The increment is recomputed
/// only when the requested frequency differs from the last one.
#[derive(Debug, Clone)]
pub(crate) struct PhaseAccumulator {
    phase: f64,
    initial_phase: f64,
    increment: f64,
    last_frequency: f64,
    /// Phase advance per sample for a 1 Hz signal
    increment_per_hz: f64,
    cycle: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    pub(crate) fn new(cycle: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            initial_phase: 0.0,
            increment: 0.0,
            last_frequency: 0.0,
            increment_per_hz: cycle / sample_rate,
            cycle,
            sample_rate,
        }
    }

    /// Moves both the current and the reset phase to `fraction` of a cycle.
    pub(crate) fn set_start(&mut self, fraction: f64) {
        self.initial_phase = wrap(fraction * self.cycle, self.cycle);
        self.phase = self.initial_phase;
    }

    /// Returns the phase to read from, then advances by one sample.
    #[inline]
    pub(crate) fn advance(&mut self, frequency: f64) -> f64 {
        if frequency != self.last_frequency {
            self.last_frequency = frequency;
            self.increment = frequency * self.increment_per_hz;
        }
        let current = self.phase;
        self.phase = wrap(self.phase + self.increment, self.cycle);
        current
    }

    pub(crate) fn phase(&self) -> f64 {
        self.phase
    }

    pub(crate) fn frequency(&self) -> f64 {
        self.last_frequency
    }

    pub(crate) fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub(crate) fn reset(&mut self) {
        self.phase = self.initial_phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::TAU;

    #[test]
    fn test_wrap_small_overshoot() {
        assert_eq!(wrap(1.25, 1.0), 0.25);
        assert_eq!(wrap(-0.25, 1.0), 0.75);
        assert_eq!(wrap(1.0, 1.0), 0.0);
        assert_eq!(wrap(0.5, 1.0), 0.5);
    }

    #[test]
    fn test_wrap_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let phase = rng.gen_range(-1.0e6..1.0e6);
            let wrapped = wrap(phase, TAU);
            assert!((0.0..TAU).contains(&wrapped), "{phase} -> {wrapped}");
        }
        assert_eq!(wrap(-1.0e-20, TAU), 0.0);
    }

    #[test]
    fn test_wrap_non_finite() {
        assert_eq!(wrap(f64::NAN, TAU), 0.0);
        assert_eq!(wrap(f64::INFINITY, TAU), 0.0);
    }

    #[test]
    fn test_value_then_advance() {
        let mut acc = PhaseAccumulator::new(8.0, 4.0);
        assert_eq!(acc.advance(1.0), 0.0);
        assert_eq!(acc.advance(1.0), 2.0);
        assert_eq!(acc.phase(), 4.0);
        assert_eq!(acc.frequency(), 1.0);
    }

    #[test]
    fn test_negative_frequency() {
        let mut acc = PhaseAccumulator::new(8.0, 4.0);
        acc.advance(-1.0);
        assert_eq!(acc.phase(), 6.0);
    }

    #[test]
    fn test_start_and_reset() {
        let mut acc = PhaseAccumulator::new(8.0, 4.0);
        acc.set_start(1.25);
        assert_eq!(acc.phase(), 2.0);
        acc.advance(1.0);
        acc.reset();
        assert_eq!(acc.phase(), 2.0);
    }
}

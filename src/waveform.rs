use std::fmt;
use std::str::FromStr;

/// Waveform shapes shared by the analytic, table and additive oscillators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    /// Ramp rising from -1 to 1 over a cycle
    SawUp,
    /// Ramp falling from 1 to -1 over a cycle
    SawDown,
    /// Square with a variable duty cycle (analytic oscillator only)
    Pulse,
}

impl Waveform {
    /// All waveforms that can be built from a harmonic series.
    pub const HARMONIC: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::SawUp,
        Waveform::SawDown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::SawUp => "saw-up",
            Waveform::SawDown => "saw-down",
            Waveform::Pulse => "pulse",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown waveform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waveform '{0}'")]
pub struct UnknownWaveform(pub String);

impl FromStr for Waveform {
    type Err = UnknownWaveform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" | "sqr" => Ok(Waveform::Square),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            "saw-up" | "sawup" | "saw" => Ok(Waveform::SawUp),
            "saw-down" | "sawdown" => Ok(Waveform::SawDown),
            "pulse" | "pwm" => Ok(Waveform::Pulse),
            _ => Err(UnknownWaveform(s.to_string())),
        }
    }
}

//! Single-cycle lookup tables.
//!
//! A [`Wavetable`] holds one cycle of a waveform followed by
//! [`GUARD_SAMPLES`] copies of its first samples. The guard samples let a
//! [`TableOscillator`](super::TableOscillator) read `index + 1` and
//! `index + 2` for any index in the cycle without wrapping, so every
//! interpolation mode works on every table.
//!
//! Tables are built in one of four ways:
//!
//! - [`Wavetable::sine`] samples `sin` directly
//! - [`Wavetable::new`] sums the harmonic series of a band-limited shape
//! - [`Wavetable::from_harmonics`] sums an arbitrary list of partial amplitudes
//! - [`Wavetable::from_samples`] wraps an existing cycle
//!
//! The two Fourier builders are peak-normalized over the cycle so that the
//! largest absolute sample is exactly 1.0. Guard samples are copied after
//! normalization. Sine and sample tables keep their values as computed.
//!
//! Tables are immutable once built and are shared between oscillators
//! through an `Arc`.

use std::f64::consts::TAU;
use std::ops::Index;

#[cfg(feature = "wavetable-loader")]
use std::path::Path;

use log::debug;

use super::harmonics::{self, Partial};
use crate::Waveform;
use crate::error::ConstructionError;

/// Number of samples appended after the cycle.
pub const GUARD_SAMPLES: usize = 2;

/// One cycle of a waveform plus guard samples.
///
/// # Examples
///
/// ```
/// use siggen::{Waveform, Wavetable};
///
/// let table = Wavetable::new(Waveform::Square, 1024, 32).unwrap();
/// assert_eq!(table.table_size(), 1024);
/// assert_eq!(table.peak(), 1.0);
/// // Guard samples repeat the start of the cycle
/// assert_eq!(table[1024], table[0]);
/// assert_eq!(table[1025], table[1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    /// Cycle followed by guard samples
    samples: Vec<f64>,
    length: usize,
}

impl Wavetable {
    /// Builds a band-limited table of `waveform` from `harmonics` partials.
    ///
    /// Only the non-zero partials are counted, so a square with 3 harmonics
    /// contains partials 1, 3 and 5. Sine ignores `harmonics` and is sampled
    /// directly.
    ///
    /// # Errors
    ///
    /// * [`ConstructionError::EmptyTable`] - `length` is zero
    /// * [`ConstructionError::HarmonicCount`] - `harmonics` is zero or not
    ///   less than `length / 2`. Not checked for `Sine`, which has no
    ///   harmonic count.
    /// * [`ConstructionError::UnsupportedWaveform`] - `Pulse` has no fixed
    ///   harmonic series
    pub fn new(
        waveform: Waveform,
        length: usize,
        harmonics: usize,
    ) -> Result<Self, ConstructionError> {
        if waveform == Waveform::Sine {
            return Self::sine(length);
        }
        check_harmonics(length, harmonics)?;
        let partials = harmonics::series(waveform, harmonics)?;
        let table = Self::from_partials(length, &partials);
        debug!("{waveform} wavetable: {length} samples, {harmonics} harmonics");
        Ok(table)
    }

    /// Samples one cycle of a sine wave.
    ///
    /// `table[i]` is `sin(2π·i / length)`. The cycle is not normalized, so
    /// when `length` is not a multiple of 4 the peak is below 1.0.
    pub fn sine(length: usize) -> Result<Self, ConstructionError> {
        if length == 0 {
            return Err(ConstructionError::EmptyTable);
        }
        let step = TAU / length as f64;
        let cycle: Vec<f64> = (0..length).map(|i| (step * i as f64).sin()).collect();
        debug!("sine wavetable: {length} samples");
        Ok(Self::with_guards(cycle))
    }

    /// Sums cosine partials with the given amplitudes.
    ///
    /// `amplitudes[k]` is the amplitude of harmonic `k + 1`. Every partial is
    /// shifted by `phase_offset` cycles of its own period; -0.25 gives sine
    /// partials.
    ///
    /// # Examples
    ///
    /// ```
    /// use siggen::Wavetable;
    ///
    /// // Fundamental plus a quieter octave
    /// let organ = Wavetable::from_harmonics(256, &[1.0, 0.0, 0.5], -0.25).unwrap();
    /// assert_eq!(organ.peak(), 1.0);
    /// ```
    pub fn from_harmonics(
        length: usize,
        amplitudes: &[f64],
        phase_offset: f64,
    ) -> Result<Self, ConstructionError> {
        check_harmonics(length, amplitudes.len())?;
        let partials: Vec<Partial> = amplitudes
            .iter()
            .enumerate()
            .map(|(k, &amplitude)| Partial {
                number: k + 1,
                amplitude,
                offset: phase_offset,
            })
            .collect();
        Ok(Self::from_partials(length, &partials))
    }

    /// Uses `cycle` as the table as is, without normalization.
    pub fn from_samples(cycle: Vec<f64>) -> Result<Self, ConstructionError> {
        if cycle.is_empty() {
            return Err(ConstructionError::EmptyTable);
        }
        Ok(Self::with_guards(cycle))
    }

    /// Loads a single-cycle waveform from a WAV file.
    ///
    /// The whole first channel becomes the cycle. Integer samples are scaled
    /// to [-1.0, 1.0]; no sample rate conversion or normalization is done.
    ///
    /// # Errors
    ///
    /// * [`Error::Wav`](crate::Error::Wav) - the file cannot be read or is
    ///   not a valid WAV file
    /// * [`ConstructionError::EmptyTable`] - the file holds no samples
    #[cfg(feature = "wavetable-loader")]
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Result<Vec<f64>, hound::Error> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect(),
            hound::SampleFormat::Int => {
                let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_value))
                    .collect()
            }
        };

        let channel: Vec<f64> = samples?
            .into_iter()
            .step_by(spec.channels.max(1) as usize)
            .collect();
        debug!(
            "loaded {}-sample wavetable ({} channels, {} bit)",
            channel.len(),
            spec.channels,
            spec.bits_per_sample
        );
        Ok(Self::from_samples(channel)?)
    }

    fn from_partials(length: usize, partials: &[Partial]) -> Self {
        let mut cycle: Vec<f64> = (0..length)
            .map(|i| {
                let position = i as f64 / length as f64;
                partials.iter().map(|p| p.value_at(position)).sum()
            })
            .collect();
        normalize(&mut cycle);
        Self::with_guards(cycle)
    }

    fn with_guards(mut cycle: Vec<f64>) -> Self {
        let length = cycle.len();
        cycle.reserve(GUARD_SAMPLES);
        for g in 0..GUARD_SAMPLES {
            cycle.push(cycle[g % length]);
        }
        Self {
            samples: cycle,
            length,
        }
    }

    /// Number of samples in one cycle, excluding guards.
    pub fn table_size(&self) -> usize {
        self.length
    }

    /// The cycle without guard samples.
    pub fn cycle(&self) -> &[f64] {
        &self.samples[..self.length]
    }

    /// The cycle followed by the guard samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        crate::breakpoints::peak(self.cycle())
    }
}

impl Index<usize> for Wavetable {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

fn check_harmonics(length: usize, harmonics: usize) -> Result<(), ConstructionError> {
    if length == 0 {
        return Err(ConstructionError::EmptyTable);
    }
    if harmonics == 0 || harmonics >= length / 2 {
        return Err(ConstructionError::HarmonicCount { harmonics, length });
    }
    Ok(())
}

/// Scales `cycle` so its peak absolute value is exactly 1.0.
///
/// A silent cycle is left untouched.
fn normalize(cycle: &mut [f64]) {
    let peak = crate::breakpoints::peak(cycle);
    if peak > 0.0 {
        for sample in cycle.iter_mut() {
            *sample /= peak;
        }
    }
}

//! Subharmonic oscillator bank and the fixed stereo fold-down.
//!
//! Generator `j` is retuned every frame to `base / ratio[j]`. The mixer
//! sends even-indexed generators left and odd-indexed generators right,
//! then attenuates each side by [`MIX_ATTENUATION`]:
//!
//! ```text
//! gen 0 (÷2) ─┐            gen 1 (÷3) ─┐
//! gen 2 (÷4) ─┴─ Σ × 0.5 → L   gen 3 (÷5) ─┴─ Σ × 0.5 → R
//! ```
//!
//! The spread is a fixed design choice, not a pan law; there is nothing to
//! tune here.

use crate::config::{validate_ratios, validate_sample_rate};
use crate::error::ConfigError;
use crate::oscillator::{ToneGenerator, Waveform};

/// Per-channel gain applied after summing.
pub const MIX_ATTENUATION: f32 = 0.5;

/// One frame of stereo output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StereoFrame {
    /// Left channel amplitude.
    pub left: f32,
    /// Right channel amplitude.
    pub right: f32,
}

/// Fold generator outputs into a stereo pair: even indices left, odd
/// indices right, each sum scaled by [`MIX_ATTENUATION`].
///
/// # Examples
///
/// ```
/// use subharmonicon::mix_stereo;
///
/// let frame = mix_stereo(&[1.0, 0.5, 1.0, -0.5]);
/// assert_eq!(frame.left, 1.0);
/// assert_eq!(frame.right, 0.0);
/// ```
#[inline]
pub fn mix_stereo(samples: &[f32]) -> StereoFrame {
    let mut left = 0.0;
    let mut right = 0.0;
    for (index, &sample) in samples.iter().enumerate() {
        if index % 2 == 0 {
            left += sample;
        } else {
            right += sample;
        }
    }
    StereoFrame {
        left: left * MIX_ATTENUATION,
        right: right * MIX_ATTENUATION,
    }
}

/// `N` tone generators locked to fixed divisors of a shared base pitch.
///
/// Ratios are validated once in [`OscillatorBank::new`]; afterwards the
/// per-frame path divides without any guard.
pub struct OscillatorBank<G, const N: usize> {
    generators: [G; N],
    ratios: [f32; N],
}

impl<G, const N: usize> OscillatorBank<G, N>
where
    G: ToneGenerator,
{
    /// Build a bank, initialising every generator for `sample_rate` with
    /// `waveform`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`] for a non-positive or non-finite
    /// rate, otherwise [`ConfigError::ZeroRatio`] or
    /// [`ConfigError::InvalidRatio`] for the first unusable divisor.
    pub fn new(
        mut generators: [G; N],
        ratios: [f32; N],
        sample_rate: f32,
        waveform: Waveform,
    ) -> Result<Self, ConfigError> {
        let validated = validate_sample_rate(sample_rate).and_then(|()| validate_ratios(&ratios));
        if let Err(e) = validated {
            #[cfg(feature = "defmt")]
            defmt::error!("Oscillator bank rejected: {}", e);
            return Err(e);
        }

        for generator in generators.iter_mut() {
            generator.init(sample_rate);
            generator.set_waveform(waveform);
        }

        Ok(Self { generators, ratios })
    }

    /// Re-run `init` on every generator. Phases restart from zero.
    pub fn reinit(&mut self, sample_rate: f32) {
        for generator in self.generators.iter_mut() {
            generator.init(sample_rate);
        }
    }

    /// Number of generators.
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for a bank with no generators.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The divisors, in generator order.
    pub fn ratios(&self) -> &[f32; N] {
        &self.ratios
    }

    /// Borrow a generator, mostly for inspection in tests.
    pub fn generator(&self, index: usize) -> Option<&G> {
        self.generators.get(index)
    }

    /// Retune every generator to `base_hz / ratio` and advance each by one
    /// sample.
    #[inline]
    pub fn process(&mut self, base_hz: f32) -> [f32; N] {
        let mut out = [0.0; N];
        for ((generator, &ratio), slot) in self
            .generators
            .iter_mut()
            .zip(self.ratios.iter())
            .zip(out.iter_mut())
        {
            generator.set_frequency(base_hz / ratio);
            *slot = generator.process();
        }
        out
    }

    /// One frame of mixed stereo output for `base_hz`.
    #[inline]
    pub fn next_frame(&mut self, base_hz: f32) -> StereoFrame {
        mix_stereo(&self.process(base_hz))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

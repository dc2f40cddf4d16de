//! Voice configuration.
//!
//! [`VoiceConfig::default()`] reproduces the reference module: 48 kHz, a
//! 20–2000 Hz CV span, four sine subharmonics at ÷2, ÷3, ÷4 and ÷5.

use crate::error::ConfigError;
use crate::oscillator::Waveform;

/// Number of subharmonic tone generators.
pub const SUBHARMONIC_COUNT: usize = 4;

/// Divisors applied to the quantized base frequency, one per generator.
pub const SUBHARMONIC_RATIOS: [f32; SUBHARMONIC_COUNT] = [2.0, 3.0, 4.0, 5.0];

/// Linear mapping from a normalized control voltage to Hz.
///
/// `to_hz(cv) = min_hz + cv · (max_hz − min_hz)`. Values of `cv` outside
/// `0.0..=1.0` are not rejected; they extrapolate and the quantizer's pitch
/// clamp bounds the result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CvRange {
    /// Frequency at CV 0.0. Default: 20 Hz.
    pub min_hz: f32,
    /// Frequency at CV 1.0. Default: 2000 Hz.
    pub max_hz: f32,
}

impl Default for CvRange {
    fn default() -> Self {
        Self {
            min_hz: 20.0,
            max_hz: 2000.0,
        }
    }
}

impl CvRange {
    /// Map a normalized control voltage to a raw frequency.
    #[inline]
    pub fn to_hz(&self, cv: f32) -> f32 {
        self.min_hz + cv * (self.max_hz - self.min_hz)
    }

    /// Returns [`ConfigError::InvalidCvRange`] unless `0 < min_hz <= max_hz`
    /// and both bounds are finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.min_hz.is_finite() && self.max_hz.is_finite();
        if finite && self.min_hz > 0.0 && self.min_hz <= self.max_hz {
            Ok(())
        } else {
            Err(ConfigError::InvalidCvRange)
        }
    }
}

/// Everything the audio-rate context needs at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoiceConfig {
    /// Audio sample rate in Hz. Default: 48 000.
    pub sample_rate: f32,
    /// CV → frequency mapping.
    pub cv_range: CvRange,
    /// Subharmonic divisors. Default: [`SUBHARMONIC_RATIOS`].
    pub ratios: [f32; SUBHARMONIC_COUNT],
    /// Shape for every generator. Default: [`Waveform::Sine`].
    pub waveform: Waveform,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            cv_range: CvRange::default(),
            ratios: SUBHARMONIC_RATIOS,
            waveform: Waveform::Sine,
        }
    }
}

impl VoiceConfig {
    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sample_rate(self.sample_rate)?;
        self.cv_range.validate()?;
        validate_ratios(&self.ratios)
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate)
    }
}

pub(crate) fn validate_ratios(ratios: &[f32]) -> Result<(), ConfigError> {
    for (index, &ratio) in ratios.iter().enumerate() {
        if ratio == 0.0 {
            return Err(ConfigError::ZeroRatio { index });
        }
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(ConfigError::InvalidRatio { index });
        }
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────

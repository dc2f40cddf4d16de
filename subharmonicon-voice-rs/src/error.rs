//! Configuration errors for the voice core.

use core::fmt;

/// Errors detected while building the voice from a [`VoiceConfig`].
///
/// All of these are fatal configuration mistakes. They are reported once,
/// by the constructors, so the per-sample path never needs a guard.
///
/// [`VoiceConfig`]: crate::config::VoiceConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A subharmonic ratio is zero, which would divide by zero every sample.
    ZeroRatio {
        /// Position of the offending ratio in the bank.
        index: usize,
    },
    /// A subharmonic ratio is negative, NaN or infinite.
    InvalidRatio {
        /// Position of the offending ratio in the bank.
        index: usize,
    },
    /// Sample rate is zero, negative or not finite.
    InvalidSampleRate,
    /// CV frequency bounds are not finite, not positive, or inverted.
    InvalidCvRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroRatio { index } => write!(f, "Subharmonic ratio {} is zero", index),
            ConfigError::InvalidRatio { index } => {
                write!(f, "Subharmonic ratio {} must be positive and finite", index)
            }
            ConfigError::InvalidSampleRate => write!(f, "Sample rate must be positive and finite"),
            ConfigError::InvalidCvRange => write!(f, "CV range must satisfy 0 < min <= max"),
        }
    }
}

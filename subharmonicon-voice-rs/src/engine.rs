//! Audio-rate entry point.
//!
//! Per frame: read the shared quantizer settings, map CV to Hz, quantize,
//! drive the bank, fold to stereo, record into the capture ring, write the
//! output. The engine is the only writer of the oscillator state and of the
//! capture ring. Nothing here blocks, allocates or logs.

use crate::bank::{OscillatorBank, StereoFrame};
use crate::capture::WaveformCapture;
use crate::config::{validate_sample_rate, CvRange, VoiceConfig, SUBHARMONIC_COUNT};
use crate::error::ConfigError;
use crate::oscillator::ToneGenerator;
use crate::params::QuantizerParams;
use crate::quantizer::quantize;

/// The audio-context state, borrowing the two shared handoffs.
///
/// # Example
///
/// ```
/// use subharmonicon::{AudioEngine, Oscillator, QuantizerParams, VoiceConfig, WaveformCapture};
///
/// static PARAMS: QuantizerParams = QuantizerParams::new();
/// static CAPTURE: WaveformCapture = WaveformCapture::new();
///
/// let mut engine = AudioEngine::new(
///     &VoiceConfig::default(),
///     [Oscillator::default(); 4],
///     &PARAMS,
///     &CAPTURE,
/// )
/// .unwrap();
///
/// let cv = [0.5; 32];
/// let (mut left, mut right) = ([0.0; 32], [0.0; 32]);
/// engine.process_block(&cv, &mut left, &mut right);
/// assert_eq!(CAPTURE.cursor(), 32);
/// ```
pub struct AudioEngine<'a, G, const N: usize = SUBHARMONIC_COUNT> {
    bank: OscillatorBank<G, N>,
    cv_range: CvRange,
    params: &'a QuantizerParams,
    capture: &'a WaveformCapture,
    /// CV held when a block supplies fewer input samples than frames.
    last_cv: f32,
    /// Quantized base frequency of the most recent frame.
    last_hz: f32,
}

impl<'a, G> AudioEngine<'a, G, SUBHARMONIC_COUNT>
where
    G: ToneGenerator,
{
    /// Build the engine from a validated [`VoiceConfig`].
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`VoiceConfig::validate`].
    pub fn new(
        config: &VoiceConfig,
        generators: [G; SUBHARMONIC_COUNT],
        params: &'a QuantizerParams,
        capture: &'a WaveformCapture,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bank = OscillatorBank::new(
            generators,
            config.ratios,
            config.sample_rate,
            config.waveform,
        )?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Audio engine ready: {} Hz, ratios {}",
            config.sample_rate,
            config.ratios
        );

        Ok(Self::with_bank(bank, config.cv_range, params, capture))
    }
}

impl<'a, G, const N: usize> AudioEngine<'a, G, N>
where
    G: ToneGenerator,
{
    /// Build the engine around an already-constructed bank of any size.
    pub fn with_bank(
        bank: OscillatorBank<G, N>,
        cv_range: CvRange,
        params: &'a QuantizerParams,
        capture: &'a WaveformCapture,
    ) -> Self {
        Self {
            bank,
            cv_range,
            params,
            capture,
            last_cv: 0.0,
            last_hz: 0.0,
        }
    }

    /// Re-initialise every generator for a new sample rate.
    ///
    /// Not real-time safe in spirit (resets phase); call between streams.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), ConfigError> {
        validate_sample_rate(sample_rate)?;
        self.bank.reinit(sample_rate);
        Ok(())
    }

    /// Process one frame for normalized control voltage `cv`.
    #[inline]
    pub fn process_frame(&mut self, cv: f32) -> StereoFrame {
        let settings = self.params.load();
        let hz = quantize(self.cv_range.to_hz(cv), settings.scale(), settings.root_note);
        let frame = self.bank.next_frame(hz);
        self.capture.push(frame.left, frame.right);
        self.last_cv = cv;
        self.last_hz = hz;
        frame
    }

    /// Fill one audio block.
    ///
    /// Every frame of `left`/`right` is written. `cv` normally has the same
    /// length; frames past its end hold the last CV value. If the output
    /// slices differ in length only the common prefix is processed.
    pub fn process_block(&mut self, cv: &[f32], left: &mut [f32], right: &mut [f32]) {
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let input = cv.get(i).copied().unwrap_or(self.last_cv);
            let frame = self.process_frame(input);
            *l = frame.left;
            *r = frame.right;
        }
    }

    /// Quantized base frequency of the most recent frame.
    pub fn last_frequency(&self) -> f32 {
        self.last_hz
    }

    /// The oscillator bank.
    pub fn bank(&self) -> &OscillatorBank<G, N> {
        &self.bank
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

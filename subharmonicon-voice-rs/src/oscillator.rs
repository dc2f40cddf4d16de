//! Tone-generator seam and a naive reference oscillator.
//!
//! The bank only talks to [`ToneGenerator`]. Boards with their own DSP
//! library wrap its oscillator in that trait; [`Oscillator`] is a plain
//! phase accumulator used on the host and as the default.

use core::f32::consts::TAU;

use libm::{fabsf, floorf, sinf};

/// Oscillator waveform shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    /// Pure fundamental.
    #[default]
    Sine,
    /// Odd harmonics, soft.
    Triangle,
    /// All harmonics, rising ramp.
    Saw,
    /// 50% duty cycle.
    Square,
}

impl Waveform {
    /// Evaluate the shape at `phase` in `[0, 1)`. Output is in `[-1, 1]`.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => sinf(phase * TAU),
            Waveform::Triangle => 4.0 * fabsf(phase - 0.5) - 1.0,
            Waveform::Saw => 2.0 * (phase - 0.5),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// The external tone-generator primitive.
///
/// Implementations own their phase. `process` is called exactly once per
/// audio frame, after `set_frequency` for that frame.
pub trait ToneGenerator {
    /// Prepare for `sample_rate` and reset phase.
    fn init(&mut self, sample_rate: f32);

    /// Select the output shape.
    fn set_waveform(&mut self, waveform: Waveform);

    /// Retune. Called every frame, so it must be cheap.
    fn set_frequency(&mut self, hz: f32);

    /// Advance one sample and return it.
    fn process(&mut self) -> f32;
}

/// Phase-accumulator oscillator without band-limiting.
///
/// Aliasing is irrelevant for the subharmonic range this module produces
/// with a sine shape; the other shapes are provided for experimentation.
///
/// # Example
///
/// ```
/// use subharmonicon::{Oscillator, ToneGenerator, Waveform};
///
/// let mut osc = Oscillator::default();
/// osc.init(48_000.0);
/// osc.set_waveform(Waveform::Sine);
/// osc.set_frequency(110.0);
/// let first = osc.process();
/// assert!(first.abs() <= 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Current phase position, `[0.0, 1.0)`.
    phase: f32,
    /// Phase increment per sample.
    phase_inc: f32,
    sample_rate: f32,
    frequency: f32,
    waveform: Waveform,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

impl Oscillator {
    /// Create an oscillator at 440 Hz, sine, for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 440.0 / sample_rate,
            sample_rate,
            frequency: 440.0,
            waveform: Waveform::Sine,
        }
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current phase, `[0.0, 1.0)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl ToneGenerator for Oscillator {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase = 0.0;
        self.phase_inc = self.frequency / sample_rate;
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    #[inline]
    fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz.max(0.0);
        self.phase_inc = self.frequency / self.sample_rate;
    }

    #[inline]
    fn process(&mut self) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase += self.phase_inc;
        // phase_inc can exceed 1.0 above the sample rate, so wrap in one step.
        if self.phase >= 1.0 {
            self.phase -= floorf(self.phase);
        }
        out
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

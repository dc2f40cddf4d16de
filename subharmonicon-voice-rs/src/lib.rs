//! Voice-generation and control core for a quantized subharmonic synthesizer.
//!
//! A continuous control voltage is quantized to the nearest note of the
//! active scale, four tone generators follow that pitch at fixed
//! subharmonic ratios, and their outputs are folded into a stereo pair. A
//! small encoder-driven state machine selects the scale, the root note and
//! the visualisation mode, and a fixed-size capture buffer hands the most
//! recent stereo samples to the display.
//!
//! # Execution contexts
//!
//! ```text
//!  audio-rate (hard real-time)            control-rate (soft real-time)
//!  ┌──────────────────────────┐           ┌───────────────────────────┐
//!  │ AudioEngine              │  reads    │ ControlSurface            │
//!  │   CV → Quantizer         │◄──────────│   encoder → UiMachine     │
//!  │   → OscillatorBank       │ Quantizer │   writes QuantizerParams  │
//!  │   → mix_stereo           │  Params   │                           │
//!  │   → WaveformCapture ─────┼──────────►│ renderer reads snapshot() │
//!  └──────────────────────────┘  capture  └───────────────────────────┘
//! ```
//!
//! Each piece of shared state has exactly one writer. The two handoffs
//! ([`QuantizerParams`] and [`WaveformCapture`]) are lock-free atomics, so
//! the audio path never blocks and never allocates.
//!
//! # `no_std` Compatibility
//!
//! The crate uses no heap allocation. All storage is fixed-size arrays and
//! the shared handoffs have `const` constructors so they can live in
//! `static`s. The optional `defmt` feature enables structured logging for
//! embedded targets.

#![cfg_attr(not(test), no_std)]

pub mod bank;
pub mod capture;
pub mod config;
pub mod control;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod oscillator;
pub mod params;
pub mod quantizer;
pub mod scale;
pub mod ui;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bank::{mix_stereo, OscillatorBank, StereoFrame, MIX_ATTENUATION};
pub use capture::{CaptureSnapshot, WaveformCapture, CAPTURE_LEN};
pub use config::{CvRange, VoiceConfig, SUBHARMONIC_COUNT, SUBHARMONIC_RATIOS};
pub use control::ControlSurface;
pub use encoder::{EncoderEvents, EncoderReading, EncoderTracker};
pub use engine::AudioEngine;
pub use error::ConfigError;
pub use oscillator::{Oscillator, ToneGenerator, Waveform};
pub use params::{QuantizerParams, QuantizerSettings};
pub use quantizer::{frequency_to_pitch, pitch_to_frequency, quantize, quantize_pitch};
pub use scale::{note_name, Scale, NOTE_LABELS, ROOT_NOTE_COUNT, SCALES, SCALE_COUNT};
pub use ui::{DisplayMode, MenuPage, UiChange, UiMachine, UiMode};

//! Nearest-note pitch quantizer.
//!
//! Runs once per audio sample, so everything here is a pure function of its
//! inputs: no allocation, no state, and a fixed upper bound on work (one
//! octave of scale degrees).
//!
//! # Algorithm
//!
//! ```text
//! pitch = 12·log2(f / 440) + 69             continuous MIDI pitch
//! rel   = pitch − (root mod 12)             measured from the root's pitch class
//! base  = floor(rel / 12) · 12
//! candidates, ascending:
//!     base + o + root_pc        for every offset o in the scale
//! keep the first candidate with the smallest |pitch − candidate|
//! clamp to 0..=127, convert back with 440·2^((n − 69)/12)
//! ```
//!
//! The search never leaves the octave that holds the pitch, so a pitch just
//! below the next root snaps down to the highest degree, not up to the root.

use libm::{exp2f, fabsf, floorf, log2f};

use crate::scale::{Scale, NOTES_PER_OCTAVE};

/// Reference tuning: MIDI 69 sounds at 440 Hz.
pub const A4_HZ: f32 = 440.0;

/// MIDI note number of [`A4_HZ`].
pub const A4_PITCH: f32 = 69.0;

/// Highest pitch the quantizer will emit.
pub const MAX_PITCH: u8 = 127;

/// Slack when locating the octave, so an exact note that went through a
/// Hz round trip (e.g. 71.99999 for 72) stays in its own octave.
const OCTAVE_EPSILON: f32 = 1e-3;

/// Convert a frequency to a continuous MIDI pitch number.
#[inline]
pub fn frequency_to_pitch(hz: f32) -> f32 {
    12.0 * log2f(hz / A4_HZ) + A4_PITCH
}

/// Convert a (possibly fractional) MIDI pitch number to a frequency.
#[inline]
pub fn pitch_to_frequency(pitch: f32) -> f32 {
    A4_HZ * exp2f((pitch - A4_PITCH) / 12.0)
}

/// Snap a continuous pitch to the nearest note of `scale` transposed to
/// `root`, searching only the root-relative octave that holds the pitch.
///
/// Ties go to the lower candidate. NaN resolves to note 0; infinities
/// clamp to the ends of the range.
pub fn quantize_pitch(pitch: f32, scale: &Scale, root: u8) -> u8 {
    if pitch.is_nan() {
        return 0;
    }
    if pitch.is_infinite() {
        return if pitch > 0.0 { MAX_PITCH } else { 0 };
    }

    let root_pc = (root % NOTES_PER_OCTAVE) as f32;
    let base = floorf((pitch - root_pc + OCTAVE_EPSILON) / 12.0) * 12.0 + root_pc;

    let mut closest = base;
    let mut closest_distance = f32::INFINITY;
    for &offset in scale.offsets.iter() {
        let candidate = base + offset as f32;
        let distance = fabsf(pitch - candidate);
        if distance < closest_distance {
            closest = candidate;
            closest_distance = distance;
        }
    }

    closest.clamp(0.0, MAX_PITCH as f32) as u8
}

/// Quantize a raw frequency to the nearest frequency in `scale` at `root`.
///
/// Non-positive or NaN input is outside the contract and is clamped to the
/// bottom of the pitch range, `+inf` to the top, rather than producing a
/// domain error.
///
/// # Examples
///
/// ```
/// use subharmonicon::{quantize, SCALES};
///
/// // 300 Hz sits at pitch ≈ 62.37; in A major the nearest degree is D (62).
/// let hz = quantize(300.0, &SCALES[0], 69);
/// assert!((hz - 293.6648).abs() < 0.01);
/// ```
#[inline]
pub fn quantize(raw_hz: f32, scale: &Scale, root: u8) -> f32 {
    // NaN fails the comparison and lands on pitch 0.
    let pitch = if raw_hz > 0.0 {
        frequency_to_pitch(raw_hz)
    } else {
        0.0
    };
    pitch_to_frequency(quantize_pitch(pitch, scale, root) as f32)
}

// ── Tests ────────────────────────────────────────────────────────────────

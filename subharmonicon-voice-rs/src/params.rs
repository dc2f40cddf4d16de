//! Quantizer settings shared from the control context to the audio context.
//!
//! The control context is the only writer; the audio context reads once per
//! frame. Both fields travel in a single [`AtomicU32`], so a reader sees
//! either the old pair or the new pair, never a scale from one and a root
//! from the other. At worst the audio path runs one frame on the previous
//! settings.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::scale::{self, Scale, DEFAULT_ROOT_NOTE, ROOT_NOTE_COUNT, SCALE_COUNT};

/// Active scale and root note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuantizerSettings {
    /// Index into [`SCALES`](crate::scale::SCALES), `< SCALE_COUNT`.
    pub scale_index: usize,
    /// Root note, `< ROOT_NOTE_COUNT`.
    pub root_note: u8,
}

impl Default for QuantizerSettings {
    /// Major, A4.
    fn default() -> Self {
        Self {
            scale_index: 0,
            root_note: DEFAULT_ROOT_NOTE,
        }
    }
}

impl QuantizerSettings {
    /// The selected scale.
    pub fn scale(&self) -> &'static Scale {
        scale::scale(self.scale_index)
    }

    /// Step the scale index by `delta`, wrapping over the catalog.
    pub fn step_scale(&mut self, delta: i32) {
        self.scale_index = wrap_step(self.scale_index as i32, delta, SCALE_COUNT as i32) as usize;
    }

    /// Step the root note by `delta`, wrapping over `0..ROOT_NOTE_COUNT`.
    pub fn step_root(&mut self, delta: i32) {
        self.root_note = wrap_step(self.root_note as i32, delta, ROOT_NOTE_COUNT as i32) as u8;
    }

    fn pack(self) -> u32 {
        ((self.scale_index as u32 & 0xFF) << 8) | self.root_note as u32
    }

    fn unpack(bits: u32) -> Self {
        Self {
            scale_index: ((bits >> 8) & 0xFF) as usize % SCALE_COUNT,
            root_note: (bits & 0xFF) as u8 % ROOT_NOTE_COUNT,
        }
    }
}

fn wrap_step(value: i32, delta: i32, modulus: i32) -> i32 {
    (value + delta).rem_euclid(modulus)
}

/// Single-word, lock-free handoff of [`QuantizerSettings`].
///
/// # Example
///
/// ```
/// use subharmonicon::{QuantizerParams, QuantizerSettings};
///
/// static PARAMS: QuantizerParams = QuantizerParams::new();
///
/// assert_eq!(PARAMS.load(), QuantizerSettings::default());
/// PARAMS.store(QuantizerSettings { scale_index: 2, root_note: 60 });
/// assert_eq!(PARAMS.load().root_note, 60);
/// ```
#[derive(Debug)]
pub struct QuantizerParams {
    bits: AtomicU32,
}

impl Default for QuantizerParams {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantizerParams {
    /// Power-on settings (Major, A4).
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(DEFAULT_ROOT_NOTE as u32),
        }
    }

    /// Publish new settings (control context only).
    #[inline]
    pub fn store(&self, settings: QuantizerSettings) {
        self.bits.store(settings.pack(), Ordering::Release);
    }

    /// Read the latest published settings (any context, wait-free).
    #[inline]
    pub fn load(&self) -> QuantizerSettings {
        QuantizerSettings::unpack(self.bits.load(Ordering::Acquire))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_major_a4() {
        let params = QuantizerParams::new();
        let s = params.load();
        assert_eq!(s.scale_index, 0);
        assert_eq!(s.root_note, 69);
        assert_eq!(s.scale().name, "Major");
    }

    #[test]
    fn store_then_load_returns_same_pair() {
        let params = QuantizerParams::new();
        for scale_index in 0..SCALE_COUNT {
            for root_note in [0u8, 1, 59, 107] {
                let s = QuantizerSettings {
                    scale_index,
                    root_note,
                };
                params.store(s);
                assert_eq!(params.load(), s);
            }
        }
    }

    #[test]
    fn step_root_wraps_both_ways() {
        let mut s = QuantizerSettings {
            scale_index: 0,
            root_note: 107,
        };
        s.step_root(1);
        assert_eq!(s.root_note, 0);
        s.step_root(-1);
        assert_eq!(s.root_note, 107);
    }

    #[test]
    fn step_scale_wraps_both_ways() {
        let mut s = QuantizerSettings::default();
        s.step_scale(-1);
        assert_eq!(s.scale_index, SCALE_COUNT - 1);
        s.step_scale(1);
        assert_eq!(s.scale_index, 0);
    }

    #[test]
    fn full_cycles_return_to_start() {
        let mut s = QuantizerSettings::default();
        for _ in 0..ROOT_NOTE_COUNT {
            s.step_root(1);
        }
        assert_eq!(s.root_note, 69);
        for _ in 0..SCALE_COUNT {
            s.step_scale(-1);
        }
        assert_eq!(s.scale_index, 0);
    }
}

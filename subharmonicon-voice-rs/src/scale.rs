//! Fixed scale catalog and note labels.
//!
//! The table is consumed by the quantizer (semitone offsets) and by the
//! menu renderer (names). It never changes at runtime; menu navigation only
//! moves an index over it.
//!
//! ```text
//! 0 Major       [0 2 4 5 7 9 11]
//! 1 Minor       [0 2 3 5 7 8 10]
//! 2 Pentatonic  [0 2 5 7 9]
//! 3 Dorian      [0 2 3 5 7 9 10]
//! 4 Mixolydian  [0 2 4 5 7 9 10]
//! 5 Chromatic   [0 1 2 3 4 5 6 7 8 9 10 11]
//! ```

/// Semitones per octave.
pub const NOTES_PER_OCTAVE: u8 = 12;

/// Octaves reachable by the root-note selector.
pub const OCTAVE_COUNT: u8 = 9;

/// Size of the root-note domain (`12 × 9`). Root selection wraps modulo this.
pub const ROOT_NOTE_COUNT: u8 = NOTES_PER_OCTAVE * OCTAVE_COUNT;

/// Root note selected at power-on (A4).
pub const DEFAULT_ROOT_NOTE: u8 = 69;

/// Number of scales in [`SCALES`].
pub const SCALE_COUNT: usize = 6;

/// Note names indexed by pitch class (`root % 12`).
pub const NOTE_LABELS: [&str; NOTES_PER_OCTAVE as usize] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A named set of semitone offsets from a root.
///
/// **Invariant:** `offsets` is strictly ascending, lies in `0..12`, starts
/// with `0` and has at least two entries. Every entry of [`SCALES`] upholds
/// this; the quantizer relies on the ascending order for its tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    /// Display name shown on the scale menu page.
    pub name: &'static str,
    /// Ascending semitone offsets relative to the root.
    pub offsets: &'static [u8],
}

impl Scale {
    /// Returns `true` if `pitch_class` (0–11, relative to the root) is a
    /// degree of this scale.
    pub fn contains(&self, pitch_class: u8) -> bool {
        self.offsets.contains(&pitch_class)
    }

    /// Check the catalog invariant for this scale.
    pub fn is_well_formed(&self) -> bool {
        self.offsets.len() >= 2
            && self.offsets[0] == 0
            && self.offsets.windows(2).all(|w| w[0] < w[1])
            && self.offsets.iter().all(|&o| o < NOTES_PER_OCTAVE)
    }
}

/// The scale catalog. Index 0 (Major) is the power-on default.
pub const SCALES: [Scale; SCALE_COUNT] = [
    Scale {
        name: "Major",
        offsets: &[0, 2, 4, 5, 7, 9, 11],
    },
    Scale {
        name: "Minor",
        offsets: &[0, 2, 3, 5, 7, 8, 10],
    },
    Scale {
        name: "Pentatonic",
        offsets: &[0, 2, 5, 7, 9],
    },
    Scale {
        name: "Dorian",
        offsets: &[0, 2, 3, 5, 7, 9, 10],
    },
    Scale {
        name: "Mixolydian",
        offsets: &[0, 2, 4, 5, 7, 9, 10],
    },
    Scale {
        name: "Chromatic",
        offsets: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
    },
];

/// Look up a scale, wrapping out-of-range indices back into the catalog.
pub fn scale(index: usize) -> &'static Scale {
    &SCALES[index % SCALE_COUNT]
}

/// Split a root note into its label and octave number.
///
/// `octave = root / 12`, so MIDI 69 is reported as `("A", 5)`.
///
/// # Examples
///
/// ```
/// use subharmonicon::note_name;
///
/// assert_eq!(note_name(69), ("A", 5));
/// assert_eq!(note_name(0), ("C", 0));
/// assert_eq!(note_name(107), ("B", 8));
/// ```
pub fn note_name(root: u8) -> (&'static str, u8) {
    let label = NOTE_LABELS[(root % NOTES_PER_OCTAVE) as usize];
    (label, root / NOTES_PER_OCTAVE)
}

// ── Tests ────────────────────────────────────────────────────────────────

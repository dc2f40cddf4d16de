//! Encoder signals as the UI state machine consumes them.
//!
//! The UI wants three things per control tick: did the button go down since
//! the last poll, how far did the knob turn since the last poll, and is the
//! button held right now. Hardware that reports those directly fills
//! [`EncoderEvents`] itself. Hardware that reports an absolute position and
//! a button level (e.g. a Seesaw encoder board) feeds [`EncoderTracker`],
//! which keeps the previous reading as a baseline and derives the deltas.

/// One control tick worth of encoder input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderEvents {
    /// The button went down since the last poll (rising edge).
    pub clicked: bool,
    /// Signed detent count since the last poll.
    pub increment: i32,
    /// Current button level, not debounced.
    pub pressed: bool,
}

impl EncoderEvents {
    /// `true` if nothing happened and the button is up.
    pub fn is_idle(&self) -> bool {
        !self.clicked && self.increment == 0 && !self.pressed
    }
}

/// Raw reading from an encoder that reports absolute state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderReading {
    /// Accumulated detent position. Free-running, may wrap.
    pub position: i32,
    /// Button level.
    pub button_down: bool,
}

/// Converts successive [`EncoderReading`]s into [`EncoderEvents`].
///
/// # Example
///
/// ```
/// use subharmonicon::{EncoderReading, EncoderTracker};
///
/// let mut tracker = EncoderTracker::new(EncoderReading { position: 10, button_down: false });
/// let events = tracker.update(EncoderReading { position: 12, button_down: true });
/// assert_eq!(events.increment, 2);
/// assert!(events.clicked);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderTracker {
    previous: EncoderReading,
}

impl EncoderTracker {
    /// Start tracking from `baseline`, so the first delta is not spurious.
    pub fn new(baseline: EncoderReading) -> Self {
        Self { previous: baseline }
    }

    /// Derive events for `reading` and make it the new baseline.
    ///
    /// The baseline moves unconditionally, even when nothing changed.
    pub fn update(&mut self, reading: EncoderReading) -> EncoderEvents {
        let events = EncoderEvents {
            clicked: reading.button_down && !self.previous.button_down,
            increment: reading.position.wrapping_sub(self.previous.position),
            pressed: reading.button_down,
        };
        self.previous = reading;
        events
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

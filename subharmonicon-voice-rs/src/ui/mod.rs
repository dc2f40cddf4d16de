//! Encoder-driven UI state machine.
//!
//! The UI is either *performing* (showing a visualisation) or in the
//! *menu* (editing quantizer settings). Modelling that as one enum makes a
//! "menu page while performing" or "display mode while in the menu"
//! combination unrepresentable:
//!
//! ```text
//!                      click                       click
//!  ┌────────────────────────┐ ───────────► ┌──────────────────────┐
//!  │ Performing             │              │ Menu                 │
//!  │  Waveform ⇄ Xy         │ ◄─────────── │  ScaleSelect ⇄ Root  │
//!  │  (any turn toggles)    │  click, and  │  (press edge toggles)│
//!  └────────────────────────┘  display is  │  turn = ±1 wrapping  │
//!                              reset to    └──────────────────────┘
//!                              Waveform
//! ```
//!
//! # Signals
//!
//! Each control tick consumes one [`EncoderEvents`](crate::EncoderEvents):
//!
//! - **`clicked`**: rising edge; toggles between performing and menu.
//! - **`increment`**: in the menu, steps the selected setting by ±1 with
//!   wraparound (only the sign matters); while performing, any non-zero
//!   value toggles the display mode regardless of direction.
//! - **`pressed`**: level; debounced against the previous tick's level so
//!   a held button toggles the menu page exactly once.
//!
//! The click is applied first, so increments and presses in the same tick
//! act on the state the click produced.

mod machine;
mod mode;

pub use machine::{UiChange, UiMachine};
pub use mode::{DisplayMode, MenuPage, UiMode};

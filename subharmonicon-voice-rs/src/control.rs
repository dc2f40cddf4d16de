//! Control-rate entry point.
//!
//! [`ControlSurface`] is everything the control context owns: the UI state
//! machine and the authoritative copy of the quantizer settings. After every
//! tick that moves a setting it publishes the new pair to the shared
//! [`QuantizerParams`], which the audio context reads. Nothing else writes
//! there.

use crate::encoder::EncoderEvents;
use crate::params::{QuantizerParams, QuantizerSettings};
use crate::ui::{UiChange, UiMachine};

/// Control-context state, borrowed handle to the shared quantizer settings.
///
/// # Example
///
/// ```
/// use subharmonicon::{ControlSurface, EncoderEvents, QuantizerParams};
///
/// static PARAMS: QuantizerParams = QuantizerParams::new();
///
/// let mut surface = ControlSurface::new(&PARAMS);
/// surface.tick(EncoderEvents { clicked: true, ..Default::default() });
/// surface.tick(EncoderEvents { increment: 1, ..Default::default() });
///
/// // The audio side sees the new scale on its next read.
/// assert_eq!(PARAMS.load().scale_index, 1);
/// ```
pub struct ControlSurface<'a> {
    ui: UiMachine,
    settings: QuantizerSettings,
    params: &'a QuantizerParams,
}

impl<'a> ControlSurface<'a> {
    /// Start from power-on defaults and publish them.
    pub fn new(params: &'a QuantizerParams) -> Self {
        let settings = QuantizerSettings::default();
        params.store(settings);
        Self {
            ui: UiMachine::new(),
            settings,
            params,
        }
    }

    /// Run one control tick.
    pub fn tick(&mut self, events: EncoderEvents) -> UiChange {
        let change = self.ui.handle(events, &mut self.settings);

        if change.settings_changed {
            self.params.store(self.settings);

            #[cfg(feature = "defmt")]
            defmt::info!(
                "Quantizer: scale={} root={}",
                self.settings.scale().name,
                self.settings.root_note
            );
        }

        change
    }

    /// The UI state machine, for rendering.
    pub fn ui(&self) -> &UiMachine {
        &self.ui
    }

    /// The control context's copy of the settings, for rendering.
    pub fn settings(&self) -> QuantizerSettings {
        self.settings
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

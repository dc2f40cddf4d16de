use super::mode::{DisplayMode, MenuPage, UiMode};
use crate::encoder::EncoderEvents;
use crate::params::QuantizerSettings;

/// What a single [`UiMachine::handle`] call changed.
///
/// Used by the control loop for logging and to decide whether the quantizer
/// settings need publishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiChange {
    /// The menu was opened or closed.
    pub menu_toggled: bool,
    /// The menu page flipped.
    pub page_toggled: bool,
    /// The performing display mode flipped.
    pub display_toggled: bool,
    /// Scale index or root note moved.
    pub settings_changed: bool,
}

impl UiChange {
    /// Returns `true` if anything changed.
    pub fn any(&self) -> bool {
        self.menu_toggled || self.page_toggled || self.display_toggled || self.settings_changed
    }
}

/// The UI state machine, owned by the control-rate context.
///
/// Holds the current [`UiMode`], the menu page to resume on the next menu
/// entry, and the previous tick's button level for press-edge detection.
///
/// # Examples
///
/// ```
/// use subharmonicon::{EncoderEvents, QuantizerSettings, UiMachine, UiMode, MenuPage};
///
/// let mut ui = UiMachine::new();
/// let mut settings = QuantizerSettings::default();
///
/// // Open the menu and turn one detent clockwise: next scale.
/// ui.handle(EncoderEvents { clicked: true, ..Default::default() }, &mut settings);
/// ui.handle(EncoderEvents { increment: 1, ..Default::default() }, &mut settings);
/// assert_eq!(ui.mode(), UiMode::Menu { page: MenuPage::ScaleSelect });
/// assert_eq!(settings.scale_index, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiMachine {
    mode: UiMode,
    /// Page shown when the menu next opens.
    resume_page: MenuPage,
    /// Button level seen on the previous tick.
    last_pressed: bool,
}

impl UiMachine {
    /// Power-on state: performing, waveform display, scale page queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> UiMode {
        self.mode
    }

    /// `true` while the menu is open.
    pub fn menu_active(&self) -> bool {
        self.mode.is_menu()
    }

    /// Menu page that is shown now, or will be shown on the next menu entry.
    pub fn menu_page(&self) -> MenuPage {
        match self.mode {
            UiMode::Menu { page } => page,
            UiMode::Performing { .. } => self.resume_page,
        }
    }

    /// Display mode while performing. Reported as [`DisplayMode::Waveform`]
    /// while the menu is open, since that is what closing it restores.
    pub fn display_mode(&self) -> DisplayMode {
        match self.mode {
            UiMode::Performing { display } => display,
            UiMode::Menu { .. } => DisplayMode::Waveform,
        }
    }

    /// Apply one control tick of encoder input.
    ///
    /// `settings` is edited in place while a menu page is active; the
    /// returned [`UiChange`] says whether it moved.
    pub fn handle(&mut self, events: EncoderEvents, settings: &mut QuantizerSettings) -> UiChange {
        let mut change = UiChange::default();

        // ── Click: open / close the menu ─────────────────────────────
        if events.clicked {
            self.mode = match self.mode {
                UiMode::Performing { .. } => UiMode::Menu {
                    page: self.resume_page,
                },
                UiMode::Menu { page } => {
                    self.resume_page = page;
                    UiMode::Performing {
                        display: DisplayMode::Waveform,
                    }
                }
            };
            change.menu_toggled = true;

            #[cfg(feature = "defmt")]
            defmt::debug!("UI mode -> {}", self.mode);
        }

        let press_edge = events.pressed && !self.last_pressed;
        self.last_pressed = events.pressed;

        match self.mode {
            // ── Menu: step the selected setting, press flips page ────
            UiMode::Menu { page } => {
                let step = events.increment.signum();
                if step != 0 {
                    match page {
                        MenuPage::ScaleSelect => settings.step_scale(step),
                        MenuPage::RootSelect => settings.step_root(step),
                    }
                    change.settings_changed = true;
                }

                if press_edge {
                    let page = page.toggled();
                    self.mode = UiMode::Menu { page };
                    self.resume_page = page;
                    change.page_toggled = true;

                    #[cfg(feature = "defmt")]
                    defmt::debug!("Menu page -> {}", page);
                }
            }

            // ── Performing: any turn flips the visualisation ─────────
            UiMode::Performing { display } => {
                if events.increment != 0 {
                    self.mode = UiMode::Performing {
                        display: display.toggled(),
                    };
                    change.display_toggled = true;
                }
            }
        }

        change
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ROOT_NOTE_COUNT, SCALE_COUNT};

    fn click() -> EncoderEvents {
        EncoderEvents {
            clicked: true,
            ..EncoderEvents::default()
        }
    }

    fn turn(increment: i32) -> EncoderEvents {
        EncoderEvents {
            increment,
            ..EncoderEvents::default()
        }
    }

    fn held() -> EncoderEvents {
        EncoderEvents {
            pressed: true,
            ..EncoderEvents::default()
        }
    }

    fn idle() -> EncoderEvents {
        EncoderEvents::default()
    }

    // Helper: a machine with the menu open on `page`.
    fn menu_on(page: MenuPage) -> (UiMachine, QuantizerSettings) {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        ui.handle(click(), &mut s);
        if page == MenuPage::RootSelect {
            ui.handle(held(), &mut s);
            ui.handle(idle(), &mut s);
        }
        assert_eq!(ui.mode(), UiMode::Menu { page });
        (ui, s)
    }

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn default_state() {
        let ui = UiMachine::new();
        assert!(!ui.menu_active());
        assert_eq!(ui.display_mode(), DisplayMode::Waveform);
        assert_eq!(ui.menu_page(), MenuPage::ScaleSelect);
    }

    #[test]
    fn idle_tick_changes_nothing() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        let change = ui.handle(idle(), &mut s);
        assert!(!change.any());
        assert_eq!(ui, UiMachine::new());
    }

    // ── Click ────────────────────────────────────────────────────────

    #[test]
    fn click_toggles_menu() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        let change = ui.handle(click(), &mut s);
        assert!(change.menu_toggled);
        assert!(ui.menu_active());
        ui.handle(click(), &mut s);
        assert!(!ui.menu_active());
    }

    #[test]
    fn leaving_menu_resets_display_to_waveform() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        ui.handle(turn(1), &mut s);
        assert_eq!(ui.display_mode(), DisplayMode::Xy);

        ui.handle(click(), &mut s);
        ui.handle(click(), &mut s);
        assert_eq!(
            ui.mode(),
            UiMode::Performing {
                display: DisplayMode::Waveform
            }
        );
    }

    #[test]
    fn increment_in_click_tick_acts_on_new_mode() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        let change = ui.handle(
            EncoderEvents {
                clicked: true,
                increment: 1,
                pressed: false,
            },
            &mut s,
        );
        assert!(ui.menu_active());
        assert!(change.settings_changed);
        assert!(!change.display_toggled);
        assert_eq!(s.scale_index, 1);
    }

    // ── Menu navigation ──────────────────────────────────────────────

    #[test]
    fn scale_page_steps_and_wraps() {
        let (mut ui, mut s) = menu_on(MenuPage::ScaleSelect);
        ui.handle(turn(-1), &mut s);
        assert_eq!(s.scale_index, SCALE_COUNT - 1);
        ui.handle(turn(1), &mut s);
        assert_eq!(s.scale_index, 0);
        assert_eq!(s.root_note, 69);
    }

    #[test]
    fn large_increments_step_by_one() {
        let (mut ui, mut s) = menu_on(MenuPage::ScaleSelect);
        ui.handle(turn(5), &mut s);
        assert_eq!(s.scale_index, 1);
        ui.handle(turn(-3), &mut s);
        assert_eq!(s.scale_index, 0);
    }

    #[test]
    fn root_page_steps_and_wraps() {
        let (mut ui, mut s) = menu_on(MenuPage::RootSelect);
        for _ in 0..ROOT_NOTE_COUNT {
            ui.handle(turn(1), &mut s);
        }
        assert_eq!(s.root_note, 69);
        for _ in 0..70 {
            ui.handle(turn(-1), &mut s);
        }
        assert_eq!(s.root_note, ROOT_NOTE_COUNT - 1);
        assert_eq!(s.scale_index, 0);
    }

    #[test]
    fn held_button_flips_page_once() {
        let (mut ui, mut s) = menu_on(MenuPage::ScaleSelect);
        let first = ui.handle(held(), &mut s);
        assert!(first.page_toggled);
        for _ in 0..10 {
            let change = ui.handle(held(), &mut s);
            assert!(!change.page_toggled);
        }
        assert_eq!(ui.menu_page(), MenuPage::RootSelect);

        ui.handle(idle(), &mut s);
        ui.handle(held(), &mut s);
        assert_eq!(ui.menu_page(), MenuPage::ScaleSelect);
    }

    #[test]
    fn page_is_resumed_on_next_entry() {
        let (mut ui, mut s) = menu_on(MenuPage::RootSelect);
        ui.handle(click(), &mut s);
        assert!(!ui.menu_active());
        assert_eq!(ui.menu_page(), MenuPage::RootSelect);
        ui.handle(click(), &mut s);
        assert_eq!(
            ui.mode(),
            UiMode::Menu {
                page: MenuPage::RootSelect
            }
        );
    }

    #[test]
    fn button_held_after_entry_does_not_flip_again() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        ui.handle(
            EncoderEvents {
                clicked: true,
                increment: 0,
                pressed: true,
            },
            &mut s,
        );
        for _ in 0..5 {
            let change = ui.handle(held(), &mut s);
            assert!(!change.page_toggled);
        }
        assert_eq!(ui.menu_page(), MenuPage::RootSelect);
    }

    #[test]
    fn single_button_press_opens_menu_and_flips_page() {
        // A physical press raises `clicked` and `pressed` together.
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        let change = ui.handle(
            EncoderEvents {
                clicked: true,
                increment: 0,
                pressed: true,
            },
            &mut s,
        );
        assert!(change.menu_toggled && change.page_toggled);
        assert_eq!(
            ui.mode(),
            UiMode::Menu {
                page: MenuPage::RootSelect
            }
        );
    }

    // ── Performing ───────────────────────────────────────────────────

    #[test]
    fn any_turn_toggles_display_mode() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        ui.handle(turn(1), &mut s);
        assert_eq!(ui.display_mode(), DisplayMode::Xy);
        ui.handle(turn(1), &mut s);
        assert_eq!(ui.display_mode(), DisplayMode::Waveform);
        ui.handle(turn(-4), &mut s);
        assert_eq!(ui.display_mode(), DisplayMode::Xy);
        assert_eq!(s, QuantizerSettings::default());
    }

    #[test]
    fn press_while_performing_is_ignored() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        let change = ui.handle(held(), &mut s);
        assert!(!change.any());
        assert_eq!(ui.menu_page(), MenuPage::ScaleSelect);
    }
}

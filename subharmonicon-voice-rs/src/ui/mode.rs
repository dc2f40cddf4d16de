/// Visualisation shown while performing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Left channel as a connected line across the screen.
    #[default]
    Waveform,
    /// Left against right as a scatter plot.
    Xy,
}

impl DisplayMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Waveform => DisplayMode::Xy,
            DisplayMode::Xy => DisplayMode::Waveform,
        }
    }
}

/// Setting edited by the encoder while the menu is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuPage {
    /// Turning selects the scale.
    #[default]
    ScaleSelect,
    /// Turning selects the root note.
    RootSelect,
}

impl MenuPage {
    /// The other page.
    pub fn toggled(self) -> Self {
        match self {
            MenuPage::ScaleSelect => MenuPage::RootSelect,
            MenuPage::RootSelect => MenuPage::ScaleSelect,
        }
    }
}

/// Top-level UI state: exactly one of the two sub-machines is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    /// Menu closed; `display` governs rendering.
    Performing {
        /// Active visualisation.
        display: DisplayMode,
    },
    /// Menu open; `page` governs rendering and encoder turns.
    Menu {
        /// Active menu page.
        page: MenuPage,
    },
}

impl Default for UiMode {
    fn default() -> Self {
        UiMode::Performing {
            display: DisplayMode::Waveform,
        }
    }
}

impl UiMode {
    /// `true` while the menu overlay is shown.
    pub fn is_menu(&self) -> bool {
        matches!(self, UiMode::Menu { .. })
    }
}

//! Errors from the OLED panel.

use core::fmt;

use display_interface::DisplayError;

/// Errors that can occur while driving the OLED.
///
/// Bus failures arrive from `ssd1306` already wrapped in [`DisplayError`],
/// so this enum is not generic over the I2C type.
#[derive(Debug)]
pub enum OledError {
    /// Display interface error (I2C or other bus-level failure).
    Display(DisplayError),
    /// The panel did not accept the initialisation sequence.
    InitializationFailed,
    /// [`OledDriver::init()`](crate::OledDriver::init) has not succeeded yet.
    NotInitialized,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OledError::Display(e) => write!(f, "display interface error: {e:?}"),
            OledError::InitializationFailed => f.write_str("OLED initialisation failed"),
            OledError::NotInitialized => f.write_str("OLED used before init"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_) => defmt::write!(f, "Display interface error"),
            OledError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_converts() {
        let e: OledError = DisplayError::BusWriteError.into();
        assert!(matches!(e, OledError::Display(DisplayError::BusWriteError)));
    }
}

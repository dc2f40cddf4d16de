//! SSD1306 panel wrapper in async buffered-graphics mode.
//!
//! Drawing only touches the in-memory frame buffer; [`OledDriver::present`]
//! is the single point where I2C traffic happens after init.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, size::DisplaySize, I2CDisplayInterface,
    Ssd1306Async,
};

use crate::error::OledError;

/// Concrete panel type behind [`OledDriver`].
pub type Panel<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Async driver for the 128×64 visualiser OLED.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] builds the driver, no bus traffic.
/// 2. [`OledDriver::init()`] sends the SSD1306 init sequence.
/// 3. Each frame: [`clear()`](OledDriver::clear), draw into
///    [`display_mut()`](OledDriver::display_mut), then
///    [`present()`](OledDriver::present).
///
/// # Example
///
/// ```no_run
/// use subharmonicon_display_rs::OledDriver;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// oled.clear();
/// oled.present().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    panel: Panel<I2C>,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Wrap `i2c` for a panel at 7-bit `address` (usually `0x3C`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let panel = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            panel,
            initialized: false,
        }
    }

    /// Send the init sequence. Call once before presenting.
    ///
    /// # Errors
    ///
    /// [`OledError::InitializationFailed`] if the panel does not respond.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.panel
            .init()
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Blank the frame buffer. No bus traffic.
    pub fn clear(&mut self) {
        self.panel.clear_buffer();
    }

    /// Push the frame buffer to the panel (about 20 ms at 400 kHz).
    ///
    /// # Errors
    ///
    /// [`OledError::NotInitialized`] before a successful [`init()`](Self::init),
    /// [`OledError::Display`] on a bus failure.
    pub async fn present(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.panel.flush().await?;
        Ok(())
    }

    /// The frame buffer as an `embedded-graphics` draw target, once
    /// initialised.
    pub fn display_mut(&mut self) -> Option<&mut Panel<I2C>> {
        if self.initialized {
            Some(&mut self.panel)
        } else {
            None
        }
    }

    /// Panel width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(DisplaySize128x64::WIDTH)
    }

    /// Panel height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(DisplaySize128x64::HEIGHT)
    }

    /// `true` after a successful [`init()`](Self::init).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

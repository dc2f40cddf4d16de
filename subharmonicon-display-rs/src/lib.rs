//! OLED front end for the subharmonicon voice: scene selection, coordinate
//! computation and drawing on an SSD1306 (128×64) using Embassy.
//!
//! [`Scene::select`] turns the UI state into one of three draw programs,
//! [`render_scene`] draws it into any monochrome `embedded-graphics`
//! [`DrawTarget`], and [`OledDriver`] owns the panel. With the `task`
//! feature, [`control_loop`] ties them together with the encoder and the
//! voice core's control surface.
//!
//! # Quick Start
//!
//! ```ignore
//! use subharmonicon::{ControlSurface, QuantizerParams, WaveformCapture};
//! use subharmonicon_display_rs::{control_loop, DisplayConfig, OledDriver};
//!
//! static PARAMS: QuantizerParams = QuantizerParams::new();
//! static CAPTURE: WaveformCapture = WaveformCapture::new();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn ui_task(oled: OledDriver<MyI2c>, encoder: MyEncoder) {
//!     let surface = ControlSurface::new(&PARAMS);
//!     control_loop(oled, encoder, surface, &CAPTURE, DisplayConfig::default()).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: the Embassy-timed [`control_loop`].
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

#![no_std]

#[cfg(feature = "task")]
pub mod control_task;
pub mod driver;
pub mod error;
pub mod render;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use control_task::{control_loop, EncoderSource};
pub use driver::OledDriver;
pub use error::OledError;
pub use render::{
    render_scene, waveform_segments, xy_points, DisplayConfig, MenuText, Scene,
};

//! The control-rate loop: poll the encoder, tick the UI, redraw.
//!
//! Everything here runs in the soft real-time context. The only state it
//! shares with the audio context is through [`ControlSurface`] (writes the
//! quantizer settings) and [`WaveformCapture`] (reads a snapshot); neither
//! takes a lock, so a slow I2C flush never stalls audio.

use embedded_hal_async::i2c::I2c;
use subharmonicon::{
    CaptureSnapshot, ControlSurface, EncoderEvents, EncoderReading, EncoderTracker,
    WaveformCapture,
};

use crate::driver::OledDriver;
use crate::render::{render_scene, DisplayConfig, Scene};

/// Anything that can report the encoder's absolute position and button.
///
/// Board crates implement this over their encoder peripheral; the loop
/// derives per-tick deltas itself.
#[allow(async_fn_in_trait)]
pub trait EncoderSource {
    /// Bus or device error.
    type Error;

    /// Read the current position and button level.
    async fn read(&mut self) -> Result<EncoderReading, Self::Error>;
}

/// Periodic control loop.
///
/// This is a regular `async fn`, not an Embassy `#[task]`, because tasks
/// cannot be generic. Wrap it in a concrete task on the board side.
///
/// # Control flow
///
/// 1. Initialise the OLED, size the layout to it and take an encoder
///    baseline.
/// 2. Every `config.update_period_ms()`:
///    - read the encoder and derive [`EncoderEvents`],
///    - [`ControlSurface::tick`], which publishes quantizer changes,
///    - copy the capture ring,
///    - clear, render the selected [`Scene`], present.
///
/// # Errors
///
/// * OLED init failure: logged, the loop **returns**.
/// * Encoder read failure: logged, the tick runs with no input.
/// * Render / present failure: logged, the loop continues.
pub async fn control_loop<I2C, E>(
    mut driver: OledDriver<I2C>,
    mut encoder: E,
    mut surface: ControlSurface<'static>,
    capture: &'static WaveformCapture,
    config: DisplayConfig,
) where
    I2C: I2c,
    E: EncoderSource,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    // Geometry follows the attached panel.
    let config = config.with_size(driver.width(), driver.height());

    let baseline = match encoder.read().await {
        Ok(reading) => reading,
        Err(_) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Encoder baseline read failed, assuming position 0");
            EncoderReading::default()
        }
    };
    let mut tracker = EncoderTracker::new(baseline);

    #[cfg(feature = "defmt")]
    defmt::info!("Control loop running at {} Hz", config.update_frequency_hz);

    let period = embassy_time::Duration::from_millis(config.update_period_ms());
    let mut snapshot = CaptureSnapshot::default();

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        embassy_time::Timer::after(period).await;

        let events = match encoder.read().await {
            Ok(reading) => tracker.update(reading),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Encoder read failed");
                EncoderEvents::default()
            }
        };

        let _change = surface.tick(events);
        #[cfg(feature = "defmt")]
        if _change.any() {
            defmt::debug!("UI change: {}", _change);
        }

        capture.snapshot_into(&mut snapshot);
        let scene = Scene::select(surface.ui(), surface.settings());

        driver.clear();
        let Some(display) = driver.display_mut() else {
            continue;
        };
        if render_scene(display, &scene, &snapshot, &config).is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("Render failed");
            continue;
        }

        if let Err(_e) = driver.present().await {
            #[cfg(feature = "defmt")]
            defmt::error!("Present failed: {}", _e);
        }
    }
}

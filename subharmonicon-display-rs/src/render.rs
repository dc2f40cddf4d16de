//! Scene selection, coordinate computation and drawing.
//!
//! Rendering is split in two so the geometry can be tested without a panel:
//!
//! - [`Scene::select`] decides which of the three draw programs runs, from
//!   the UI state and the control context's copy of the quantizer settings.
//! - [`waveform_segments`] and [`xy_points`] map a [`CaptureSnapshot`] to
//!   screen coordinates.
//!
//! [`render_scene`] then draws through any monochrome `embedded-graphics`
//! target.
//!
//! ```text
//!  Menu                Waveform             XY
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │Menu:         │    │   /\    /\   │    │    · ··      │
//! │Scale: Major  │    │──/──\──/──\──│    │  ·  ┼  ·     │
//! │              │    │ /    \/    \ │    │    ·· ·      │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use heapless::String;
use subharmonicon::{
    note_name, CaptureSnapshot, DisplayMode, MenuPage, QuantizerSettings, UiMachine, UiMode,
    CAPTURE_LEN,
};

/// Longest menu line: "Scale: " plus the longest scale name.
const LINE_CAPACITY: usize = 24;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Geometry and refresh rate for the visualiser.
///
/// [`DisplayConfig::default()`] reproduces the reference layout: 128×64,
/// 30 Hz, samples scaled by 20 px around the centre, menu lines at y = 0
/// and y = 15.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Redraw rate in Hz. Default: 30.
    pub update_frequency_hz: u32,
    /// Display width in pixels. Default: 128.
    pub display_width: u32,
    /// Display height in pixels. Default: 64.
    pub display_height: u32,
    /// Pixels per unit of sample amplitude. Default: 20.
    pub amplitude_scale: f32,
    /// Top of the "Menu:" header. Default: 0.
    pub header_y: i32,
    /// Top of the scale / root line. Default: 15.
    pub detail_y: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            display_width: 128,
            display_height: 64,
            amplitude_scale: 20.0,
            header_y: 0,
            detail_y: 15,
        }
    }
}

impl DisplayConfig {
    /// Timer period for the configured frequency, `1000 / update_frequency_hz`.
    /// A zero frequency is treated as 1 Hz.
    pub fn update_period_ms(&self) -> u64 {
        1000 / u64::from(self.update_frequency_hz.max(1))
    }

    /// The same layout for a panel of `width` × `height` pixels.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            display_width: width,
            display_height: height,
            ..self
        }
    }

    /// Screen centre: the zero line for waveforms, the origin for XY.
    pub fn centre(&self) -> Point {
        Point::new(
            (self.display_width / 2) as i32,
            (self.display_height / 2) as i32,
        )
    }
}

// ── Scene ────────────────────────────────────────────────────────────────

/// Two lines of menu text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuText {
    /// Fixed header, always `"Menu:"`.
    pub header: &'static str,
    /// `"Scale: <name>"` or `"Root: <note><octave>"`.
    pub detail: String<LINE_CAPACITY>,
}

impl MenuText {
    /// Text for `page` showing `settings`.
    pub fn new(page: MenuPage, settings: QuantizerSettings) -> Self {
        let mut detail = String::new();
        let written = match page {
            MenuPage::ScaleSelect => write!(detail, "Scale: {}", settings.scale().name),
            MenuPage::RootSelect => {
                let (label, octave) = note_name(settings.root_note);
                write!(detail, "Root: {label}{octave}")
            }
        };
        // Every scale name and note label fits in LINE_CAPACITY.
        debug_assert!(written.is_ok(), "menu line overflow: {}", detail);

        Self {
            header: "Menu:",
            detail,
        }
    }
}

/// The draw program for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    /// Menu header and the active page's setting.
    Menu(MenuText),
    /// Connected line across the left-channel capture.
    Waveform,
    /// Left vs right scatter.
    Xy,
}

impl Scene {
    /// Pick the scene for the current UI state.
    ///
    /// ```
    /// use subharmonicon::{QuantizerSettings, UiMachine};
    /// use subharmonicon_display_rs::Scene;
    ///
    /// let scene = Scene::select(&UiMachine::new(), QuantizerSettings::default());
    /// assert_eq!(scene, Scene::Waveform);
    /// ```
    pub fn select(ui: &UiMachine, settings: QuantizerSettings) -> Self {
        match ui.mode() {
            UiMode::Menu { page } => Scene::Menu(MenuText::new(page, settings)),
            UiMode::Performing {
                display: DisplayMode::Waveform,
            } => Scene::Waveform,
            UiMode::Performing {
                display: DisplayMode::Xy,
            } => Scene::Xy,
        }
    }
}

// ── Coordinates ──────────────────────────────────────────────────────────

#[inline]
fn to_screen(sample: f32, scale: f32, offset: i32) -> i32 {
    // Truncating cast; saturates for wild samples.
    (sample * scale + offset as f32) as i32
}

/// Line segments for the waveform view, one per adjacent pair of
/// left-channel samples (`CAPTURE_LEN - 1` in total).
///
/// Sample `i` sits at `x = i * (width / CAPTURE_LEN)`,
/// `y = left[i] * amplitude_scale + height / 2`.
pub fn waveform_segments<'a>(
    snapshot: &'a CaptureSnapshot,
    config: &DisplayConfig,
) -> impl Iterator<Item = (Point, Point)> + 'a {
    let step = (config.display_width / CAPTURE_LEN as u32) as i32;
    let scale = config.amplitude_scale;
    let mid = config.centre().y;

    let point = move |i: usize, sample: f32| Point::new(i as i32 * step, to_screen(sample, scale, mid));

    snapshot
        .left
        .windows(2)
        .enumerate()
        .map(move |(i, pair)| (point(i, pair[0]), point(i + 1, pair[1])))
}

/// One point per captured frame: `x` from the left channel, `y` from the
/// right, both scaled by `amplitude_scale` around the centre.
pub fn xy_points<'a>(
    snapshot: &'a CaptureSnapshot,
    config: &DisplayConfig,
) -> impl Iterator<Item = Point> + 'a {
    let scale = config.amplitude_scale;
    let centre = config.centre();

    snapshot
        .frames()
        .map(move |(l, r)| Point::new(to_screen(l, scale, centre.x), to_screen(r, scale, centre.y)))
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Draw `scene` into `display`. The caller clears and presents.
///
/// Off-screen coordinates are left to the target to clip.
///
/// # Example
///
/// ```no_run
/// # use subharmonicon::CaptureSnapshot;
/// # use subharmonicon_display_rs::{render_scene, DisplayConfig, Scene};
/// # fn example(display: &mut impl embedded_graphics::draw_target::DrawTarget<Color = embedded_graphics::pixelcolor::BinaryColor>) {
/// let snapshot = CaptureSnapshot::default();
/// render_scene(display, &Scene::Xy, &snapshot, &DisplayConfig::default()).ok();
/// # }
/// ```
pub fn render_scene<D>(
    display: &mut D,
    scene: &Scene,
    snapshot: &CaptureSnapshot,
    config: &DisplayConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    match scene {
        Scene::Menu(text) => {
            let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
            Text::with_baseline(text.header, Point::new(0, config.header_y), style, Baseline::Top)
                .draw(display)?;
            Text::with_baseline(
                text.detail.as_str(),
                Point::new(0, config.detail_y),
                style,
                Baseline::Top,
            )
            .draw(display)?;
        }
        Scene::Waveform => {
            let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
            for (start, end) in waveform_segments(snapshot, config) {
                Line::new(start, end).into_styled(stroke).draw(display)?;
            }
        }
        Scene::Xy => {
            display.draw_iter(xy_points(snapshot, config).map(|p| Pixel(p, BinaryColor::On)))?;
        }
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use subharmonicon::EncoderEvents;

    const W: usize = 128;
    const H: usize = 64;

    /// In-memory 128×64 monochrome frame buffer.
    struct Canvas {
        pixels: [[bool; W]; H],
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: [[false; W]; H],
            }
        }

        fn lit(&self, x: usize, y: usize) -> bool {
            self.pixels[y][x]
        }

        fn lit_count(&self) -> usize {
            self.pixels.iter().flatten().filter(|&&p| p).count()
        }

        fn row_has_ink(&self, y: usize) -> bool {
            self.pixels[y].iter().any(|&p| p)
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if (0..W as i32).contains(&p.x) && (0..H as i32).contains(&p.y) {
                    self.pixels[p.y as usize][p.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    fn settings(scale_index: usize, root_note: u8) -> QuantizerSettings {
        QuantizerSettings {
            scale_index,
            root_note,
        }
    }

    fn menu_detail(page: MenuPage, s: QuantizerSettings) -> String<LINE_CAPACITY> {
        MenuText::new(page, s).detail
    }

    // ── DisplayConfig ────────────────────────────────────────────────

    #[test]
    fn default_config_values() {
        let c = DisplayConfig::default();
        assert_eq!(c.update_frequency_hz, 30);
        assert_eq!(c.display_width, 128);
        assert_eq!(c.display_height, 64);
        assert_eq!(c.amplitude_scale, 20.0);
        assert_eq!(c.header_y, 0);
        assert_eq!(c.detail_y, 15);
        assert_eq!(c.centre(), Point::new(64, 32));
    }

    #[test]
    fn update_period_30hz() {
        assert_eq!(DisplayConfig::default().update_period_ms(), 33);
    }

    #[test]
    fn update_period_zero_hz_does_not_divide_by_zero() {
        let c = DisplayConfig {
            update_frequency_hz: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(c.update_period_ms(), 1000);
    }

    #[test]
    fn with_size_moves_centre_and_keeps_layout() {
        let c = DisplayConfig::default().with_size(96, 16);
        assert_eq!(c.display_width, 96);
        assert_eq!(c.display_height, 16);
        assert_eq!(c.centre(), Point::new(48, 8));
        assert_eq!(c.amplitude_scale, 20.0);
        assert_eq!(c.detail_y, 15);
        assert_eq!(c.update_frequency_hz, 30);
    }

    #[test]
    fn every_menu_line_fits() {
        for scale_index in 0..subharmonicon::SCALE_COUNT {
            let text = MenuText::new(MenuPage::ScaleSelect, settings(scale_index, 0));
            assert!(text.detail.ends_with(subharmonicon::SCALES[scale_index].name));
        }
        for root in 0..subharmonicon::ROOT_NOTE_COUNT {
            let text = MenuText::new(MenuPage::RootSelect, settings(0, root));
            let (label, _) = note_name(root);
            assert!(text.detail.starts_with("Root: "));
            assert!(text.detail.as_str()[6..].starts_with(label));
        }
    }

    // ── Scene selection ──────────────────────────────────────────────

    #[test]
    fn performing_selects_waveform_then_xy() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        assert_eq!(Scene::select(&ui, s), Scene::Waveform);

        ui.handle(
            EncoderEvents {
                increment: 1,
                ..EncoderEvents::default()
            },
            &mut s,
        );
        assert_eq!(Scene::select(&ui, s), Scene::Xy);
    }

    #[test]
    fn menu_selects_text_for_page() {
        let mut ui = UiMachine::new();
        let mut s = QuantizerSettings::default();
        ui.handle(
            EncoderEvents {
                clicked: true,
                ..EncoderEvents::default()
            },
            &mut s,
        );
        match Scene::select(&ui, s) {
            Scene::Menu(text) => {
                assert_eq!(text.header, "Menu:");
                assert_eq!(text.detail.as_str(), "Scale: Major");
            }
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn scale_line_names_scale() {
        assert_eq!(menu_detail(MenuPage::ScaleSelect, settings(1, 69)), "Scale: Minor");
        assert_eq!(
            menu_detail(MenuPage::ScaleSelect, settings(2, 69)),
            "Scale: Pentatonic"
        );
    }

    #[test]
    fn root_line_uses_note_and_integer_octave() {
        assert_eq!(menu_detail(MenuPage::RootSelect, settings(0, 69)), "Root: A5");
        assert_eq!(menu_detail(MenuPage::RootSelect, settings(0, 0)), "Root: C0");
        assert_eq!(menu_detail(MenuPage::RootSelect, settings(0, 61)), "Root: C#5");
        assert_eq!(menu_detail(MenuPage::RootSelect, settings(0, 107)), "Root: B8");
    }

    // ── Coordinates ──────────────────────────────────────────────────

    #[test]
    fn waveform_segments_span_the_buffer() {
        let mut snap = CaptureSnapshot::default();
        snap.left[5] = 1.0;
        snap.left[6] = -1.0;
        let segs: heapless::Vec<(Point, Point), CAPTURE_LEN> =
            waveform_segments(&snap, &DisplayConfig::default()).collect();

        assert_eq!(segs.len(), CAPTURE_LEN - 1);
        assert_eq!(segs[0], (Point::new(0, 32), Point::new(1, 32)));
        assert_eq!(segs[5], (Point::new(5, 52), Point::new(6, 12)));
        assert_eq!(segs[CAPTURE_LEN - 2].1, Point::new(127, 32));
        for (a, b) in segs.iter() {
            assert_eq!(b.x - a.x, 1);
        }
    }

    #[test]
    fn waveform_step_follows_width() {
        let snap = CaptureSnapshot::default();
        let config = DisplayConfig {
            display_width: 256,
            ..DisplayConfig::default()
        };
        let (_, last) = waveform_segments(&snap, &config).last().unwrap();
        assert_eq!(last.x, 254);
    }

    #[test]
    fn xy_points_plot_every_frame() {
        let mut snap = CaptureSnapshot::default();
        snap.left[0] = 0.5;
        snap.right[0] = -0.5;
        let config = DisplayConfig::default();

        assert_eq!(xy_points(&snap, &config).count(), CAPTURE_LEN);
        assert_eq!(xy_points(&snap, &config).next(), Some(Point::new(74, 22)));
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn silent_waveform_draws_centre_line() {
        let mut canvas = Canvas::new();
        let snap = CaptureSnapshot::default();
        render_scene(&mut canvas, &Scene::Waveform, &snap, &DisplayConfig::default()).unwrap();

        assert_eq!(canvas.lit_count(), 128);
        assert!((0..W).all(|x| canvas.lit(x, 32)));
    }

    #[test]
    fn silent_xy_draws_single_centre_dot() {
        let mut canvas = Canvas::new();
        let snap = CaptureSnapshot::default();
        render_scene(&mut canvas, &Scene::Xy, &snap, &DisplayConfig::default()).unwrap();

        assert_eq!(canvas.lit_count(), 1);
        assert!(canvas.lit(64, 32));
    }

    #[test]
    fn menu_text_sits_on_two_lines() {
        let mut canvas = Canvas::new();
        let scene = Scene::Menu(MenuText::new(MenuPage::RootSelect, settings(0, 69)));
        render_scene(
            &mut canvas,
            &scene,
            &CaptureSnapshot::default(),
            &DisplayConfig::default(),
        )
        .unwrap();

        assert!((0..10).any(|y| canvas.row_has_ink(y)));
        assert!((15..25).any(|y| canvas.row_has_ink(y)));
        assert!((26..H).all(|y| !canvas.row_has_ink(y)));
    }

    #[test]
    fn out_of_range_samples_are_clipped() {
        let mut canvas = Canvas::new();
        let mut snap = CaptureSnapshot::default();
        snap.left = [10.0; CAPTURE_LEN];
        snap.right = [-10.0; CAPTURE_LEN];
        let config = DisplayConfig::default();

        render_scene(&mut canvas, &Scene::Xy, &snap, &config).unwrap();
        render_scene(&mut canvas, &Scene::Waveform, &snap, &config).unwrap();
        assert_eq!(canvas.lit_count(), 0);
    }
}

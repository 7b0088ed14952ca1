//! Headless banner demo.
//!
//! Mounts a banner and its page indicator on console-backed hosts, then
//! scripts a few gestures against them: a committing drag, a snap-back drag,
//! and indicator taps. Run with `RUST_LOG=debug` to watch the gesture engine
//! narrate its commit decisions.

use anyhow::Result;
use bannerkit_foundation::{
    AutoplayController, ElementHost, ImageLoader, MarkerAsset, MarkerHost, SlideElement,
    SlideHandle,
};
use bannerkit_graphics::Size;
use bannerkit_testing::GestureRobot;
use bannerkit_ui::{Banner, BannerIndicator, IndicatorStyle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct ConsoleSlide;

impl SlideElement for ConsoleSlide {}

/// Element host that renders the banner as a line of text instead of pixels.
struct ConsoleSurface {
    viewport: Cell<Size>,
    offsets: RefCell<Vec<f32>>,
}

impl ConsoleSurface {
    fn new(viewport: Size) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(viewport),
            offsets: RefCell::new(Vec::new()),
        })
    }

    /// Index of the slide whose left edge sits at the viewport origin, if any
    /// slide is settled there.
    fn visible_slide(&self) -> Option<usize> {
        self.offsets
            .borrow()
            .iter()
            .position(|x| x.abs() < f32::EPSILON)
    }
}

impl ElementHost for ConsoleSurface {
    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn set_children(&self, slides: &[SlideHandle]) {
        *self.offsets.borrow_mut() = vec![0.0; slides.len()];
    }

    fn place_child(&self, index: usize, x: f32) {
        if let Some(slot) = self.offsets.borrow_mut().get_mut(index) {
            *slot = x;
        }
    }

    fn create_slide(&self) -> SlideHandle {
        Rc::new(ConsoleSlide)
    }

    fn request_redraw(&self) {}
}

/// Marker host that keeps the strip as a vector of glyphs and lets the demo
/// fire tap commands by index.
struct ConsoleStrip {
    glyphs: RefCell<Vec<char>>,
    taps: RefCell<Vec<Option<Rc<dyn Fn()>>>>,
}

impl ConsoleStrip {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            glyphs: RefCell::new(Vec::new()),
            taps: RefCell::new(Vec::new()),
        })
    }

    fn line(&self) -> String {
        self.glyphs
            .borrow()
            .iter()
            .map(|glyph| glyph.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn tap(&self, index: usize) {
        let handler = self.taps.borrow()[index]
            .clone()
            .expect("marker tapped before the indicator bound it");
        handler();
    }
}

impl MarkerHost for ConsoleStrip {
    fn rebuild_markers(&self, count: usize, _interval: f32) {
        *self.glyphs.borrow_mut() = vec!['.'; count];
        *self.taps.borrow_mut() = vec![None; count];
    }

    fn set_marker_asset(&self, index: usize, asset: MarkerAsset) {
        self.glyphs.borrow_mut()[index] = if asset == SELECTED_DOT { 'O' } else { '.' };
    }

    fn bind_marker_tap(&self, index: usize, on_tap: Rc<dyn Fn()>) {
        self.taps.borrow_mut()[index] = Some(on_tap);
    }

    fn request_redraw(&self) {}
}

/// Stand-in for a real image pipeline: loading is fire-and-forget, so the
/// demo just logs what it was asked for.
struct LoggingLoader;

impl ImageLoader for LoggingLoader {
    fn load(&self, source: &str, _target: &SlideHandle) {
        log::info!("loading {} into its slide", source);
    }
}

struct ChattyAutoplay;

impl AutoplayController for ChattyAutoplay {
    fn pause(&self) {
        println!("  (autoplay paused)");
    }

    fn resume(&self) {
        println!("  (autoplay resumed)");
    }
}

const SELECTED_DOT: MarkerAsset = MarkerAsset(1);
const UNSELECTED_DOT: MarkerAsset = MarkerAsset(0);

const VIEWPORT_WIDTH: f32 = 320.0;

fn report(surface: &ConsoleSurface, strip: &ConsoleStrip, banner: &Banner) {
    let visible = surface
        .visible_slide()
        .map(|index| format!("slide {}", index))
        .unwrap_or_else(|| "nothing settled".to_string());
    println!(
        "  page {} of {} | showing {} | {}",
        banner.current_page() + 1,
        banner.state().slide_count(),
        visible,
        strip.line()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Bannerkit Headless Demo ===");
    println!();

    let surface = ConsoleSurface::new(Size::new(VIEWPORT_WIDTH, 180.0));
    let banner = Banner::new(surface.clone());
    banner.set_image_slides(
        vec![
            "banners/spring.png".to_string(),
            "banners/summer.png".to_string(),
            "banners/autumn.png".to_string(),
            "banners/winter.png".to_string(),
        ],
        &LoggingLoader,
    );
    banner.set_autoplay_controller(Rc::new(ChattyAutoplay));

    let strip = ConsoleStrip::new();
    let indicator = BannerIndicator::new(
        strip.clone(),
        IndicatorStyle {
            interval: 8.0,
            selected: Some(SELECTED_DOT),
            unselected: Some(UNSELECTED_DOT),
        },
    );
    indicator.bind(&banner, banner.state().slide_count());

    println!("Mounted {} slides:", banner.state().slide_count());
    report(&surface, &strip, &banner);
    println!();

    let robot = GestureRobot::new(&banner);

    println!("Dragging two thirds of the viewport forward (commits):");
    robot.drag(300.0, 300.0 - VIEWPORT_WIDTH * 2.0 / 3.0, 8);
    report(&surface, &strip, &banner);
    println!();

    println!("Dragging a fifth of the viewport forward (snaps back):");
    robot.drag(300.0, 300.0 - VIEWPORT_WIDTH / 5.0, 8);
    report(&surface, &strip, &banner);
    println!();

    println!("Tapping the last marker:");
    strip.tap(3);
    report(&surface, &strip, &banner);
    println!();

    println!("Dragging forward at the last page (clamped):");
    robot.drag(300.0, 100.0, 8);
    report(&surface, &strip, &banner);
    println!();

    println!("Dragging back past the threshold:");
    robot.drag(100.0, 100.0 + VIEWPORT_WIDTH / 2.0, 8);
    report(&surface, &strip, &banner);
    println!();

    println!("Resetting to the first page:");
    banner.reset();
    report(&surface, &strip, &banner);

    Ok(())
}

//! Recording host implementations.
//!
//! Each host records the calls the components make so tests can assert on
//! placements, marker assets, tap wiring, and collaborator ordering without
//! any real rendering surface.

use bannerkit_foundation::{
    AutoplayController, ElementHost, ImageLoader, MarkerAsset, MarkerHost, SlideElement,
    SlideHandle,
};
use bannerkit_graphics::Size;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct RecordedSlide;

impl SlideElement for RecordedSlide {}

/// Builds `count` opaque slide handles for tests.
pub fn test_slides(count: usize) -> Vec<SlideHandle> {
    (0..count)
        .map(|_| Rc::new(RecordedSlide) as SlideHandle)
        .collect()
}

/// Element host that records child adoption, placements, and redraws.
pub struct RecordingElementHost {
    viewport: Cell<Size>,
    children: RefCell<Vec<SlideHandle>>,
    placements: RefCell<Vec<(usize, f32)>>,
    redraws: Cell<usize>,
    created_slides: Cell<usize>,
}

impl RecordingElementHost {
    pub fn new(viewport: Size) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(viewport),
            children: RefCell::new(Vec::new()),
            placements: RefCell::new(Vec::new()),
            redraws: Cell::new(0),
            created_slides: Cell::new(0),
        })
    }

    pub fn set_viewport(&self, size: Size) {
        self.viewport.set(size);
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Full history of `place_child` calls, oldest first.
    pub fn placements(&self) -> Vec<(usize, f32)> {
        self.placements.borrow().clone()
    }

    /// Most recent placement of child `index`.
    pub fn last_offset_of(&self, index: usize) -> Option<f32> {
        self.placements
            .borrow()
            .iter()
            .rev()
            .find(|(placed, _)| *placed == index)
            .map(|(_, x)| *x)
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws.get()
    }

    pub fn created_slide_count(&self) -> usize {
        self.created_slides.get()
    }
}

impl ElementHost for RecordingElementHost {
    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn set_children(&self, slides: &[SlideHandle]) {
        *self.children.borrow_mut() = slides.to_vec();
    }

    fn place_child(&self, index: usize, x: f32) {
        self.placements.borrow_mut().push((index, x));
    }

    fn create_slide(&self) -> SlideHandle {
        self.created_slides.set(self.created_slides.get() + 1);
        Rc::new(RecordedSlide)
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

/// Marker host that records the strip the indicator builds and lets tests
/// fire the bound tap commands.
pub struct RecordingMarkerHost {
    marker_count: Cell<usize>,
    interval: Cell<f32>,
    rebuilds: Cell<usize>,
    assets: RefCell<Vec<Option<MarkerAsset>>>,
    taps: RefCell<Vec<Option<Rc<dyn Fn()>>>>,
    redraws: Cell<usize>,
}

impl RecordingMarkerHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            marker_count: Cell::new(0),
            interval: Cell::new(0.0),
            rebuilds: Cell::new(0),
            assets: RefCell::new(Vec::new()),
            taps: RefCell::new(Vec::new()),
            redraws: Cell::new(0),
        })
    }

    pub fn marker_count(&self) -> usize {
        self.marker_count.get()
    }

    pub fn interval(&self) -> f32 {
        self.interval.get()
    }

    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.get()
    }

    pub fn asset_of(&self, index: usize) -> Option<MarkerAsset> {
        self.assets.borrow().get(index).copied().flatten()
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws.get()
    }

    /// Fires the tap command bound to marker `index`.
    ///
    /// Panics when no command is bound, which is exactly the lifecycle
    /// ordering bug the indicator contract treats as fatal.
    pub fn tap(&self, index: usize) {
        let handler = self.taps.borrow()[index]
            .clone()
            .expect("no tap command bound to marker");
        handler();
    }
}

impl MarkerHost for RecordingMarkerHost {
    fn rebuild_markers(&self, count: usize, interval: f32) {
        self.marker_count.set(count);
        self.interval.set(interval);
        self.rebuilds.set(self.rebuilds.get() + 1);
        *self.assets.borrow_mut() = vec![None; count];
        *self.taps.borrow_mut() = vec![None; count];
    }

    fn set_marker_asset(&self, index: usize, asset: MarkerAsset) {
        self.assets.borrow_mut()[index] = Some(asset);
    }

    fn bind_marker_tap(&self, index: usize, on_tap: Rc<dyn Fn()>) {
        self.taps.borrow_mut()[index] = Some(on_tap);
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

/// Image loader that records the sources it was asked to materialize.
#[derive(Default)]
pub struct RecordingImageLoader {
    sources: RefCell<Vec<String>>,
}

impl RecordingImageLoader {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn loaded_sources(&self) -> Vec<String> {
        self.sources.borrow().clone()
    }
}

impl ImageLoader for RecordingImageLoader {
    fn load(&self, source: &str, _target: &SlideHandle) {
        self.sources.borrow_mut().push(source.to_string());
    }
}

/// Autoplay controller that records pause/resume ordering.
#[derive(Default)]
pub struct RecordingAutoplay {
    events: RefCell<Vec<String>>,
}

impl RecordingAutoplay {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl AutoplayController for RecordingAutoplay {
    fn pause(&self) {
        self.events.borrow_mut().push("pause".to_string());
    }

    fn resume(&self) {
        self.events.borrow_mut().push("resume".to_string());
    }
}

//! Banner carousel component.
//!
//! Owns the slide sequence and a [`BannerState`], and connects both to an
//! [`ElementHost`]: layout places slide `i` at `i * viewport_width` minus the
//! scroll offset, pointer events feed the drag state machine, and state
//! invalidations re-place the children and request a redraw.

use crate::banner_state::BannerState;
use bannerkit_foundation::{
    AutoplayController, ElementHost, ImageLoader, PointerEvent, PointerEventKind, SlideHandle,
};
use bannerkit_graphics::Size;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Paged banner carousel. Cheap to clone; clones share the same component.
#[derive(Clone)]
pub struct Banner {
    inner: Rc<BannerInner>,
}

struct BannerInner {
    state: BannerState,
    host: Rc<dyn ElementHost>,
    slides: RefCell<Vec<SlideHandle>>,
    /// Content refs behind `set_image_slides`, kept for callers that need to
    /// know what was assigned.
    image_refs: RefCell<Vec<String>>,
    autoplay: RefCell<Option<Rc<dyn AutoplayController>>>,
    invalidate_id: Cell<Option<u64>>,
}

impl BannerInner {
    fn apply_layout(&self) {
        let width = self.state.viewport_width();
        let offset = self.state.scroll_offset();
        let count = self.slides.borrow().len();
        for index in 0..count {
            self.host.place_child(index, index as f32 * width - offset);
        }
        self.host.request_redraw();
    }
}

impl Banner {
    pub fn new(host: Rc<dyn ElementHost>) -> Self {
        let inner = Rc::new(BannerInner {
            state: BannerState::new(),
            host,
            slides: RefCell::new(Vec::new()),
            image_refs: RefCell::new(Vec::new()),
            autoplay: RefCell::new(None),
            invalidate_id: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let id = inner.state.add_invalidate_callback(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.apply_layout();
            }
        }));
        inner.invalidate_id.set(Some(id));

        let banner = Self { inner };
        let size = banner.inner.host.viewport_size();
        banner.inner.state.set_layout(0, size.width);
        banner
    }

    pub fn state(&self) -> &BannerState {
        &self.inner.state
    }

    /// Replaces the slide sequence. Always a full rebuild: the previous
    /// children are discarded, slide `i` is laid out at
    /// `[i * viewport_width, (i + 1) * viewport_width)`, and a redraw is
    /// requested. An empty input clears the banner.
    pub fn set_slides(&self, slides: Vec<SlideHandle>) {
        self.inner.host.set_children(&slides);
        let count = slides.len();
        *self.inner.slides.borrow_mut() = slides;
        self.inner.image_refs.borrow_mut().clear();
        let width = self.inner.host.viewport_size().width;
        self.inner.state.set_layout(count, width);
        self.inner.apply_layout();
        log::debug!("banner: {} slides laid out at width {}", count, width);
    }

    /// Builds slides from content refs: the host manufactures an empty slide
    /// per ref and the loader fills it in, fire-and-forget. Empty refs are
    /// skipped. The banner's position math is unaffected by load latency; a
    /// slide simply renders as a placeholder until its content arrives.
    pub fn set_image_slides(&self, refs: Vec<String>, loader: &dyn ImageLoader) {
        let mut slides = Vec::with_capacity(refs.len());
        let mut kept = Vec::with_capacity(refs.len());
        for source in refs {
            if source.is_empty() {
                log::debug!("banner: skipping empty image ref");
                continue;
            }
            let slide = self.inner.host.create_slide();
            loader.load(&source, &slide);
            slides.push(slide);
            kept.push(source);
        }
        self.set_slides(slides);
        *self.inner.image_refs.borrow_mut() = kept;
    }

    pub fn slides(&self) -> Vec<SlideHandle> {
        self.inner.slides.borrow().clone()
    }

    pub fn image_refs(&self) -> Vec<String> {
        self.inner.image_refs.borrow().clone()
    }

    pub fn current_page(&self) -> usize {
        self.inner.state.current_page()
    }

    /// Jumps to a page; out-of-range indices clamp to the nearest boundary.
    pub fn set_current_page(&self, index: isize) {
        self.inner.state.set_current_page(index);
    }

    /// Scrolls back to the first page.
    pub fn reset(&self) {
        self.inner.state.reset();
    }

    /// Host layout pass: the viewport was (re)measured.
    pub fn on_resized(&self, size: Size) {
        let count = self.inner.slides.borrow().len();
        self.inner.state.set_layout(count, size.width);
        self.inner.apply_layout();
    }

    /// Routes a pointer event into the drag engine. Returns whether the
    /// banner handled the event.
    ///
    /// Down is tracked but intentionally left unconsumed so tap targets
    /// inside slides still see it; Move is consumed once it actually drags
    /// the content; Up commits the page decision; Cancel restores the
    /// settled offset.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if event.is_consumed() {
                    return false;
                }
                self.inner.state.drag_start(event.position.x);
                true
            }
            PointerEventKind::Move => {
                if event.is_consumed() {
                    return false;
                }
                let moved = self.inner.state.drag_move(event.position.x);
                if moved {
                    event.consume();
                }
                moved
            }
            PointerEventKind::Up => {
                self.inner.state.drag_end(event.position.x);
                true
            }
            PointerEventKind::Cancel => {
                self.inner.state.drag_cancel();
                true
            }
        }
    }

    /// Installs the surrounding system's autoplay hooks. The banner never
    /// schedules polling itself; it only forwards pause/resume requests.
    pub fn set_autoplay_controller(&self, controller: Rc<dyn AutoplayController>) {
        *self.inner.autoplay.borrow_mut() = Some(controller);
    }

    pub fn pause_autoplay(&self) {
        let controller = self.inner.autoplay.borrow().clone();
        if let Some(controller) = controller {
            controller.pause();
        }
    }

    pub fn resume_autoplay(&self) {
        let controller = self.inner.autoplay.borrow().clone();
        if let Some(controller) = controller {
            controller.resume();
        }
    }

    /// Detaches the component from its state: cancels any in-flight drag
    /// (the offset returns to its last settled value) and unregisters the
    /// layout subscription.
    pub fn detach(&self) {
        self.inner.state.drag_cancel();
        if let Some(id) = self.inner.invalidate_id.take() {
            self.inner.state.remove_invalidate_callback(id);
        }
    }
}

//! Paging state machine for the banner.
//!
//! `BannerState` is a pure interaction model: it holds the slide count, the
//! measured viewport width, the scroll offset, and the drag state, and it
//! decides which page a released drag commits to. It knows nothing about
//! slides or hosts; the `Banner` component wires it to a surface.

use bannerkit_foundation::gesture_constants::DEFAULT_SNAP_FRACTION;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BANNER_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Direction of a drag, relative to page order.
///
/// Forward means toward higher page indices: the content moves left under the
/// pointer, so the per-move pointer delta is negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragDirection {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        /// Pointer x at gesture start. Backward commitment is decided from
        /// the total displacement against this, not from per-move deltas.
        start_x: f32,
        /// Pointer x at the last accepted move.
        last_x: f32,
        /// Direction of the most recent move, None until the pointer moves.
        direction: Option<DragDirection>,
        /// Settled scroll offset at gesture start, restored on cancel.
        origin_offset: f32,
    },
}

/// State object for the banner's scroll position and gesture arithmetic.
///
/// Cheap to clone; clones share the same underlying state. Single-threaded
/// by construction, like the rest of the component layer.
#[derive(Clone)]
pub struct BannerState {
    inner: Rc<Inner>,
}

struct Inner {
    /// Unique ID for debugging
    id: u64,
    slide_count: Cell<usize>,
    viewport_width: Cell<f32>,
    /// Signed horizontal offset in viewport units. Settles into
    /// [0, viewport_width * (slide_count - 1)]; may transiently leave that
    /// range mid-drag.
    scroll_offset: Cell<f32>,
    drag: Cell<DragState>,
    /// Page most recently announced on the notification channel. Emission is
    /// gated on a change against this value, which also breaks notification
    /// cycles when a handler re-enters `set_current_page`.
    last_notified_page: Cell<usize>,
    snap_fraction: Cell<f32>,
    page_changed_callbacks: RefCell<HashMap<u64, Rc<dyn Fn(usize)>>>,
    /// Callbacks to re-place children when the scroll offset changes.
    invalidate_callbacks: RefCell<HashMap<u64, Box<dyn Fn()>>>,
    /// Tracks whether we need to invalidate once a callback is registered.
    pending_invalidation: Cell<bool>,
}

impl BannerState {
    pub fn new() -> Self {
        Self::with_snap_fraction(DEFAULT_SNAP_FRACTION)
    }

    /// Creates a state with a custom commit threshold fraction. Values that
    /// are not finite and positive fall back to the default.
    pub fn with_snap_fraction(fraction: f32) -> Self {
        let id = NEXT_BANNER_STATE_ID.fetch_add(1, Ordering::Relaxed);
        let state = Self {
            inner: Rc::new(Inner {
                id,
                slide_count: Cell::new(0),
                viewport_width: Cell::new(0.0),
                scroll_offset: Cell::new(0.0),
                drag: Cell::new(DragState::Idle),
                last_notified_page: Cell::new(0),
                snap_fraction: Cell::new(DEFAULT_SNAP_FRACTION),
                page_changed_callbacks: RefCell::new(HashMap::new()),
                invalidate_callbacks: RefCell::new(HashMap::new()),
                pending_invalidation: Cell::new(false),
            }),
        };
        state.set_snap_fraction(fraction);
        state
    }

    /// Get the unique ID of this BannerState
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn slide_count(&self) -> usize {
        self.inner.slide_count.get()
    }

    pub fn viewport_width(&self) -> f32 {
        self.inner.viewport_width.get()
    }

    /// Current scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.inner.scroll_offset.get()
    }

    /// Largest settled scroll offset: the left edge of the last slide.
    pub fn max_offset(&self) -> f32 {
        self.inner.viewport_width.get() * self.inner.slide_count.get().saturating_sub(1) as f32
    }

    /// Page the offset currently falls on, clamped into range. Page 0 while
    /// the state has no valid layout.
    pub fn current_page(&self) -> usize {
        let width = self.inner.viewport_width.get();
        let count = self.inner.slide_count.get();
        if !self.is_valid() {
            return 0;
        }
        let page = (self.inner.scroll_offset.get() / width).floor().max(0.0) as usize;
        page.min(count - 1)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.inner.drag.get(), DragState::Dragging { .. })
    }

    pub fn snap_fraction(&self) -> f32 {
        self.inner.snap_fraction.get()
    }

    /// Sets the commit threshold fraction. Non-finite or non-positive values
    /// are rejected as no-ops; configuration is never an error path.
    pub fn set_snap_fraction(&self, fraction: f32) {
        if fraction.is_finite() && fraction > 0.0 {
            self.inner.snap_fraction.set(fraction);
        } else {
            log::debug!(
                "banner state {}: ignoring snap fraction {}",
                self.inner.id,
                fraction
            );
        }
    }

    fn is_valid(&self) -> bool {
        self.inner.slide_count.get() > 0 && self.inner.viewport_width.get() > 0.0
    }

    /// Re-layout entry point: records the slide count and measured viewport
    /// width, and clamps the offset into the new settled range. A zero width
    /// is a normal transient during initial measurement; the state simply
    /// stays inert until a real width arrives.
    pub fn set_layout(&self, slide_count: usize, viewport_width: f32) {
        self.inner.slide_count.set(slide_count);
        self.inner.viewport_width.set(viewport_width);
        if !self.is_valid() {
            log::debug!(
                "banner state {}: layout not ready (slides={}, width={})",
                self.inner.id,
                slide_count,
                viewport_width
            );
            return;
        }
        let clamped = self
            .inner
            .scroll_offset
            .get()
            .clamp(0.0, self.max_offset());
        self.inner.scroll_offset.set(clamped);
    }

    /// Jumps to the given page, clamping out-of-range requests to the nearest
    /// boundary. Emits a page-changed notification only when the resulting
    /// page differs from the previously announced one.
    pub fn set_current_page(&self, index: isize) {
        if !self.is_valid() {
            log::debug!(
                "banner state {}: set_current_page({}) before layout, ignored",
                self.inner.id,
                index
            );
            return;
        }
        let last = self.inner.slide_count.get() as isize - 1;
        let page = index.clamp(0, last) as usize;
        self.inner
            .scroll_offset
            .set(page as f32 * self.inner.viewport_width.get());
        self.invalidate();
        self.notify_page_changed(page);
    }

    /// Scrolls back to the first page.
    pub fn reset(&self) {
        self.set_current_page(0);
    }

    /// Begins a drag at pointer position `x`. Ignored while another drag is
    /// in progress or while the state has no slides or no measured width.
    pub fn drag_start(&self, x: f32) {
        if !self.is_valid() {
            log::trace!("banner state {}: drag ignored, no layout", self.inner.id);
            return;
        }
        if matches!(self.inner.drag.get(), DragState::Dragging { .. }) {
            return;
        }
        self.inner.drag.set(DragState::Dragging {
            start_x: x,
            last_x: x,
            direction: None,
            origin_offset: self.inner.scroll_offset.get(),
        });
    }

    /// Applies a drag move to pointer position `x`. Returns whether the move
    /// was consumed.
    ///
    /// The per-move delta decides the direction; a move pushing past the
    /// first or last slide is rejected outright, leaving both the offset and
    /// the last pointer position untouched.
    pub fn drag_move(&self, x: f32) -> bool {
        let DragState::Dragging {
            start_x,
            last_x,
            origin_offset,
            ..
        } = self.inner.drag.get()
        else {
            return false;
        };

        let delta = x - last_x;
        let direction = if delta < 0.0 {
            DragDirection::Forward
        } else {
            DragDirection::Backward
        };

        let offset = self.inner.scroll_offset.get();
        let rejected = match direction {
            DragDirection::Forward => offset >= self.max_offset(),
            DragDirection::Backward => offset <= 0.0,
        };

        self.inner.drag.set(DragState::Dragging {
            start_x,
            last_x: if rejected { last_x } else { x },
            direction: Some(direction),
            origin_offset,
        });

        if rejected {
            log::trace!(
                "banner state {}: move at edge rejected (offset={}, {:?})",
                self.inner.id,
                offset,
                direction
            );
            return false;
        }

        // Dragging left moves content left, increasing the effective page.
        self.inner.scroll_offset.set(offset - delta);
        self.invalidate();
        true
    }

    /// Ends a drag at pointer position `x`, snapping to the committed page.
    ///
    /// Forward commitment looks at how far the offset sits into the current
    /// page; backward commitment deliberately uses the total displacement
    /// from the gesture start instead, so many small moves cannot jitter the
    /// decision. A short backward drag therefore still advances to the next
    /// page boundary.
    pub fn drag_end(&self, x: f32) {
        let DragState::Dragging {
            start_x, direction, ..
        } = self.inner.drag.get()
        else {
            return;
        };
        self.inner.drag.set(DragState::Idle);
        if !self.is_valid() {
            return;
        }

        let width = self.inner.viewport_width.get();
        let count = self.inner.slide_count.get();
        let last = count - 1;
        let offset = self.inner.scroll_offset.get();
        let pos = ((offset / width).floor().max(0.0) as usize).min(last);
        let within = offset - pos as f32 * width;
        let threshold = width * self.inner.snap_fraction.get();

        let target = match direction {
            Some(DragDirection::Forward) => {
                if within > threshold {
                    (pos + 1).min(last)
                } else {
                    pos
                }
            }
            Some(DragDirection::Backward) => {
                let total = x - start_x;
                if total > threshold {
                    pos
                } else {
                    (pos + 1).min(last)
                }
            }
            // Pointer never moved; stay on the settled page.
            None => pos,
        };

        log::debug!(
            "banner state {}: drag commit {:?} pos={} within={} -> page {}",
            self.inner.id,
            direction,
            pos,
            within,
            target
        );

        self.inner.scroll_offset.set(target as f32 * width);
        self.invalidate();
        self.notify_page_changed(target);
    }

    /// Implicit cancellation, e.g. the consuming surface was torn down
    /// mid-gesture. Restores the offset the gesture started from so the
    /// state never re-attaches mid-drag. No notification is emitted.
    pub fn drag_cancel(&self) {
        let DragState::Dragging { origin_offset, .. } = self.inner.drag.get() else {
            return;
        };
        self.inner.drag.set(DragState::Idle);
        self.inner.scroll_offset.set(origin_offset);
        self.invalidate();
    }

    /// Registers a page-changed observer and returns its ID. Callbacks run
    /// synchronously on the call that commits the page change, once per
    /// committed change.
    pub fn add_page_changed_callback(&self, callback: impl Fn(usize) + 'static) -> u64 {
        static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed);
        self.inner
            .page_changed_callbacks
            .borrow_mut()
            .insert(id, Rc::new(callback));
        id
    }

    pub fn remove_page_changed_callback(&self, id: u64) {
        self.inner.page_changed_callbacks.borrow_mut().remove(&id);
    }

    /// Adds an invalidation callback and returns its ID
    pub fn add_invalidate_callback(&self, callback: Box<dyn Fn()>) -> u64 {
        static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed);
        self.inner
            .invalidate_callbacks
            .borrow_mut()
            .insert(id, callback);
        if self.inner.pending_invalidation.replace(false) {
            if let Some(callback) = self.inner.invalidate_callbacks.borrow().get(&id) {
                callback();
            }
        }
        id
    }

    /// Removes an invalidation callback by ID
    pub fn remove_invalidate_callback(&self, id: u64) {
        self.inner.invalidate_callbacks.borrow_mut().remove(&id);
    }

    fn invalidate(&self) {
        let callbacks = self.inner.invalidate_callbacks.borrow();
        if callbacks.is_empty() {
            // Defer invalidation until a component registers a callback.
            self.inner.pending_invalidation.set(true);
        } else {
            for callback in callbacks.values() {
                callback();
            }
        }
    }

    fn notify_page_changed(&self, page: usize) {
        if self.inner.last_notified_page.get() == page {
            return;
        }
        // Record the page before dispatching so a handler chaining back into
        // set_current_page terminates instead of cycling.
        self.inner.last_notified_page.set(page);
        let callbacks: SmallVec<[Rc<dyn Fn(usize)>; 2]> = self
            .inner
            .page_changed_callbacks
            .borrow()
            .values()
            .cloned()
            .collect();
        for callback in callbacks {
            callback(page);
        }
    }
}

impl Default for BannerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/banner_state_tests.rs"]
mod tests;

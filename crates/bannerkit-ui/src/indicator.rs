//! Page indicator for the banner.
//!
//! A pure follower: it holds no page state beyond the last notification it
//! received from the bound banner. On every page change it re-renders each
//! marker's selected/unselected asset and re-binds each marker's tap command.
//! Taps flow back into the banner as explicit jump commands, shifted by whole
//! marker cycles when the banner has more pages than the strip has markers.

use crate::banner::Banner;
use bannerkit_foundation::{MarkerAsset, MarkerHost};
use bannerkit_graphics::Size;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Static visual configuration for an indicator strip.
#[derive(Clone, Debug, Default)]
pub struct IndicatorStyle {
    /// Spacing between adjacent markers in logical pixels. Negative values
    /// are treated as zero.
    pub interval: f32,
    /// Asset for the active marker; `None` leaves the host's visual alone.
    pub selected: Option<MarkerAsset>,
    /// Asset for inactive markers; `None` leaves the host's visual alone.
    pub unselected: Option<MarkerAsset>,
}

/// Page indicator component. Cheap to clone; clones share the same strip.
#[derive(Clone)]
pub struct BannerIndicator {
    inner: Rc<IndicatorInner>,
}

struct IndicatorInner {
    host: Rc<dyn MarkerHost>,
    style: IndicatorStyle,
    banner: RefCell<Option<Banner>>,
    marker_count: Cell<usize>,
    /// Page from the last notification. May exceed the marker count when the
    /// banner cycles through more pages than the strip renders.
    current_position: Cell<usize>,
    callback_id: Cell<Option<u64>>,
}

impl IndicatorInner {
    fn sync(inner: &Rc<Self>, page: usize) {
        let count = inner.marker_count.get();
        if count == 0 {
            return;
        }
        inner.current_position.set(page);
        let column = page % count;
        for index in 0..count {
            let asset = if index == column {
                inner.style.selected
            } else {
                inner.style.unselected
            };
            if let Some(asset) = asset {
                inner.host.set_marker_asset(index, asset);
            }
            let weak = Rc::downgrade(inner);
            inner.host.bind_marker_tap(
                index,
                Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        IndicatorInner::jump_to_column(&inner, index);
                    }
                }),
            );
        }
        inner.host.request_redraw();
    }

    fn jump_to_column(inner: &Rc<Self>, index: usize) {
        let banner = inner
            .banner
            .borrow()
            .clone()
            .expect("indicator marker tapped before bind()");
        let count = inner.marker_count.get();
        if count == 0 {
            return;
        }
        banner.pause_autoplay();
        let position = inner.current_position.get() as isize;
        let column = (inner.current_position.get() % count) as isize;
        // Jump a whole number of marker cycles plus the tapped column.
        banner.set_current_page(position + (index as isize - column));
        banner.resume_autoplay();
    }
}

impl BannerIndicator {
    pub fn new(host: Rc<dyn MarkerHost>, style: IndicatorStyle) -> Self {
        Self {
            inner: Rc::new(IndicatorInner {
                host,
                style,
                banner: RefCell::new(None),
                marker_count: Cell::new(0),
                current_position: Cell::new(0),
                callback_id: Cell::new(None),
            }),
        }
    }

    /// Couples the indicator to a banner: rebuilds the marker strip from
    /// scratch, subscribes to the banner's page-changed notifications, and
    /// immediately syncs to its current page.
    ///
    /// A `page_count` of one or less yields an empty strip; a single-page
    /// banner shows no indicator.
    pub fn bind(&self, banner: &Banner, page_count: usize) {
        if let Some(id) = self.inner.callback_id.take() {
            if let Some(previous) = self.inner.banner.borrow().as_ref() {
                previous.state().remove_page_changed_callback(id);
            }
        }

        let count = if page_count > 1 { page_count } else { 0 };
        if count == 0 {
            if banner.state().slide_count() > 1 {
                log::warn!(
                    "indicator: bound {} page(s) to a banner with {} slides, strip stays empty",
                    page_count,
                    banner.state().slide_count()
                );
            } else {
                log::debug!("indicator: {} page(s), strip stays empty", page_count);
            }
        }
        self.inner.marker_count.set(count);
        self.inner
            .host
            .rebuild_markers(count, self.inner.style.interval.max(0.0));
        *self.inner.banner.borrow_mut() = Some(banner.clone());

        let weak = Rc::downgrade(&self.inner);
        let id = banner.state().add_page_changed_callback(move |page| {
            if let Some(inner) = weak.upgrade() {
                IndicatorInner::sync(&inner, page);
            }
        });
        self.inner.callback_id.set(Some(id));

        IndicatorInner::sync(&self.inner, banner.current_page());
    }

    /// The handler the indicator registers on the banner's notification
    /// channel. Public so a host can also drive the strip directly.
    pub fn on_page_changed(&self, page: usize) {
        IndicatorInner::sync(&self.inner, page);
    }

    pub fn marker_count(&self) -> usize {
        self.inner.marker_count.get()
    }

    /// Column of the active marker, derived from the last notification.
    pub fn selected_column(&self) -> usize {
        let count = self.inner.marker_count.get();
        if count == 0 {
            0
        } else {
            self.inner.current_position.get() % count
        }
    }

    /// Total size of the strip given one marker's measured size:
    /// `count` markers plus `count - 1` gaps.
    pub fn measured_size(&self, marker: Size) -> Size {
        let count = self.inner.marker_count.get();
        if count == 0 {
            return Size::ZERO;
        }
        let interval = self.inner.style.interval.max(0.0);
        Size::new(
            (count - 1) as f32 * interval + marker.width * count as f32,
            marker.height,
        )
    }
}

#[cfg(test)]
#[path = "tests/indicator_tests.rs"]
mod tests;

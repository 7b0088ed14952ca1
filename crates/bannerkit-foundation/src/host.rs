//! Capability traits implemented by the embedding surface.

use bannerkit_graphics::Size;
use std::rc::Rc;

/// Opaque visual element hosted by the embedding surface.
///
/// The banner never inspects slide content; a slide is only a fixed-width
/// child the host knows how to draw. Content ownership stays with whoever
/// supplied the element.
pub trait SlideElement {}

/// Shared handle to a hosted slide.
pub type SlideHandle = Rc<dyn SlideElement>;

/// The visual surface a banner is mounted on.
///
/// This replaces inheritance from a platform container view: the banner only
/// needs to measure the viewport, hand the surface its children, place each
/// child at a horizontal offset, and ask for a redraw.
pub trait ElementHost {
    /// Current measured size of the visible window. A zero width is a normal
    /// transient during initial measurement; banner operations no-op until a
    /// valid width arrives.
    fn viewport_size(&self) -> Size;

    /// Replace the hosted children with the given sequence. Always a full
    /// replacement, never an incremental mutation.
    fn set_children(&self, slides: &[SlideHandle]);

    /// Place child `index` so its left edge sits at `x` (viewport
    /// coordinates, may be negative while scrolled).
    fn place_child(&self, index: usize, x: f32);

    /// Manufacture an empty slide element, to be filled asynchronously by an
    /// [`ImageLoader`]. The element may render as a placeholder until its
    /// content arrives.
    fn create_slide(&self) -> SlideHandle;

    fn request_redraw(&self);
}

/// Opaque token for a marker visual supplied by the host (selected dot,
/// unselected dot). The indicator passes these through without interpreting
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerAsset(pub u32);

/// The strip of page markers an indicator renders into.
pub trait MarkerHost {
    /// Discard existing markers and create `count` new ones, spaced
    /// `interval` logical pixels apart. A count of zero clears the strip.
    fn rebuild_markers(&self, count: usize, interval: f32);

    /// Swap marker `index` to the given visual asset.
    fn set_marker_asset(&self, index: usize, asset: MarkerAsset);

    /// Register the tap command for marker `index`, replacing any previous
    /// one. The indicator re-binds all taps on every page change.
    fn bind_marker_tap(&self, index: usize, on_tap: Rc<dyn Fn()>);

    fn request_redraw(&self);
}

/// Materializes image content into a slide element.
///
/// Loading is fire-and-forget from the banner's perspective: the call must
/// not block, the banner never awaits completion, and failure handling
/// (retry, fallback art) is entirely the loader's concern.
pub trait ImageLoader {
    fn load(&self, source: &str, target: &SlideHandle);
}

/// Pause/resume hooks for a surrounding system's slide polling.
///
/// The indicator pauses autoplay around a tap-initiated jump so the poller
/// does not fight the user. The banner itself never schedules anything.
pub trait AutoplayController {
    fn pause(&self);
    fn resume(&self);
}

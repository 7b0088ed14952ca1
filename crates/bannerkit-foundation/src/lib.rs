//! Pointer input and host capability traits for Bannerkit
//!
//! The banner components never depend on a concrete UI framework. Everything
//! they need from the embedding surface is expressed here as small capability
//! traits: a surface that can measure itself, place children at horizontal
//! offsets, and request a redraw; a marker strip that can rebuild and restyle
//! its dots; and fire-and-forget collaborators for image loading and autoplay
//! control.

pub mod gesture_constants;
mod host;
mod input;

pub use host::*;
pub use input::*;

pub mod prelude {
    pub use crate::gesture_constants::DEFAULT_SNAP_FRACTION;
    pub use crate::host::{
        AutoplayController, ElementHost, ImageLoader, MarkerAsset, MarkerHost, SlideElement,
        SlideHandle,
    };
    pub use crate::input::{PointerEvent, PointerEventKind};
}

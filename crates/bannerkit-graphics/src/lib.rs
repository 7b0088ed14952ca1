//! Pure math/data for geometry in Bannerkit
//!
//! This crate contains the geometry primitives shared by the banner
//! components and their hosts.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Size};
}

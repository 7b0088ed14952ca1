//! Shared gesture constants for paging behavior.
//!
//! These values are in logical pixels / fractions of the viewport. They are
//! kept in one place so the gesture engine and any host-side previews agree
//! on when a drag commits.

/// Fraction of the viewport width a drag must cross before the release
/// commits a page change.
///
/// A pure midpoint rule (0.5) feels unresponsive for quick flicks; one third
/// lets a user commit a page intentionally with a modest drag while small
/// accidental moves still snap back. Overridable per state object, but the
/// default must stay at one third.
pub const DEFAULT_SNAP_FRACTION: f32 = 1.0 / 3.0;

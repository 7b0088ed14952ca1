//! Testing utilities and harness for Bannerkit

mod recording;
mod robot;

pub use recording::*;
pub use robot::*;

pub mod prelude {
    pub use crate::recording::{
        test_slides, RecordingAutoplay, RecordingElementHost, RecordingImageLoader,
        RecordingMarkerHost,
    };
    pub use crate::robot::GestureRobot;
}

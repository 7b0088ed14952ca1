//! Scripted pointer gestures against a banner.

use bannerkit_foundation::{PointerEvent, PointerEventKind};
use bannerkit_graphics::Point;
use bannerkit_ui::Banner;

/// Drives a banner with synthetic pointer sequences the way a finger would.
pub struct GestureRobot {
    banner: Banner,
}

impl GestureRobot {
    pub fn new(banner: &Banner) -> Self {
        Self {
            banner: banner.clone(),
        }
    }

    pub fn press(&self, x: f32) -> bool {
        self.dispatch(PointerEventKind::Down, x)
    }

    /// Moves the pointer to `x`. Returns whether the banner consumed the
    /// move.
    pub fn move_to(&self, x: f32) -> bool {
        self.dispatch(PointerEventKind::Move, x)
    }

    pub fn release(&self, x: f32) {
        self.dispatch(PointerEventKind::Up, x);
    }

    pub fn cancel(&self) {
        self.dispatch(PointerEventKind::Cancel, 0.0);
    }

    /// Full drag from `from` to `to` in `steps` evenly spaced moves.
    pub fn drag(&self, from: f32, to: f32, steps: usize) {
        self.press(from);
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.move_to(from + (to - from) * fraction);
        }
        self.release(to);
    }

    fn dispatch(&self, kind: PointerEventKind, x: f32) -> bool {
        let event = PointerEvent::new(kind, Point::new(x, 0.0));
        self.banner.on_pointer_event(&event)
    }
}

//! Pointer interaction: tells a pan drag apart from a click.
//!
//! Any movement while the button is held counts as a drag, including moves
//! that report a zero delta. A click that follows a drag is swallowed.

use crate::viewport::{PanAnchor, Viewport};
use armkit_core::Point2D;

/// Where the pointer is in its press/drag cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Button down, no movement yet.
    Pressed(PanAnchor),
    /// Button down and moved at least once.
    Dragging(PanAnchor),
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerUp {
    /// Released without moving; the following click should be handled.
    Click,
    /// Released after a drag; the following click will be suppressed.
    DragEnd,
    /// Release without a matching press.
    None,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
    suppress_click: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging(_))
    }

    /// Starts a press at `screen`, capturing the camera for panning.
    pub fn pointer_down(&mut self, viewport: &Viewport, screen: Point2D) {
        self.state = PointerState::Pressed(viewport.pan_anchor(screen));
        self.suppress_click = false;
    }

    /// Pans the viewport if the button is held. Returns true when the camera
    /// moved.
    pub fn pointer_move(&mut self, viewport: &mut Viewport, screen: Point2D) -> bool {
        match self.state {
            PointerState::Idle => false,
            PointerState::Pressed(anchor) | PointerState::Dragging(anchor) => {
                self.state = PointerState::Dragging(anchor);
                viewport.pan_to(&anchor, screen);
                true
            }
        }
    }

    pub fn pointer_up(&mut self) -> PointerUp {
        let outcome = match self.state {
            PointerState::Idle => PointerUp::None,
            PointerState::Pressed(_) => PointerUp::Click,
            PointerState::Dragging(_) => {
                self.suppress_click = true;
                PointerUp::DragEnd
            }
        };
        self.state = PointerState::Idle;
        outcome
    }

    /// Resolves a click to its world position, or `None` if it ends a drag.
    ///
    /// Consumes the suppression flag either way.
    pub fn click(&mut self, viewport: &Viewport, screen: Point2D) -> Option<Point2D> {
        if std::mem::take(&mut self.suppress_click) {
            tracing::trace!("Click after drag suppressed");
            return None;
        }
        Some(viewport.screen_to_world(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_is_click() {
        let vp = Viewport::new(800.0, 600.0);
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(&vp, Point2D::new(500.0, 300.0));
        assert_eq!(tracker.pointer_up(), PointerUp::Click);
        assert_eq!(
            tracker.click(&vp, Point2D::new(500.0, 300.0)),
            Some(Point2D::new(100.0, 0.0))
        );
    }

    #[test]
    fn test_drag_pans_and_suppresses_click() {
        let mut vp = Viewport::new(800.0, 600.0);
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(&vp, Point2D::new(400.0, 300.0));
        assert!(tracker.pointer_move(&mut vp, Point2D::new(450.0, 280.0)));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.pointer_up(), PointerUp::DragEnd);

        assert_eq!(vp.camera().x, -50.0);
        assert_eq!(vp.camera().y, -20.0);
        assert_eq!(tracker.click(&vp, Point2D::new(450.0, 280.0)), None);
        // Only the first click is swallowed
        assert!(tracker.click(&vp, Point2D::new(450.0, 280.0)).is_some());
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut vp = Viewport::new(800.0, 600.0);
        let mut tracker = PointerTracker::new();
        assert!(!tracker.pointer_move(&mut vp, Point2D::new(10.0, 10.0)));
        assert_eq!(vp.camera(), crate::Camera::default());
        assert_eq!(tracker.pointer_up(), PointerUp::None);
    }

    #[test]
    fn test_new_press_clears_stale_suppression() {
        let mut vp = Viewport::new(800.0, 600.0);
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(&vp, Point2D::new(0.0, 0.0));
        tracker.pointer_move(&mut vp, Point2D::new(1.0, 1.0));
        tracker.pointer_up();

        tracker.pointer_down(&vp, Point2D::new(5.0, 5.0));
        assert_eq!(tracker.pointer_up(), PointerUp::Click);
        assert!(tracker.click(&vp, Point2D::new(5.0, 5.0)).is_some());
    }
}

use armkit_core::Point2D;
use armkit_visualizer::{Camera, PointerTracker, PointerUp, Viewport};
use proptest::prelude::*;

fn close(a: Point2D, b: Point2D, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}

fn viewport(cam_x: f64, cam_y: f64, zoom: f64, width: f64, height: f64) -> Viewport {
    let mut vp = Viewport::new(width, height);
    vp.set_camera(Camera::new(cam_x, cam_y, zoom));
    vp
}

proptest! {
    #[test]
    fn screen_to_world_inverts_world_to_screen(
        cam_x in -1000.0..1000.0f64,
        cam_y in -1000.0..1000.0f64,
        zoom in 0.05..100.0f64,
        width in 1.0..4000.0f64,
        height in 1.0..4000.0f64,
        wx in -5000.0..5000.0f64,
        wy in -5000.0..5000.0f64,
    ) {
        let vp = viewport(cam_x, cam_y, zoom, width, height);
        let world = Point2D::new(wx, wy);
        let back = vp.screen_to_world(vp.world_to_screen(world));
        prop_assert!(close(back, world, 1e-6 * (1.0 + world.length())));
    }

    #[test]
    fn zoom_keeps_point_under_cursor(
        cam_x in -500.0..500.0f64,
        cam_y in -500.0..500.0f64,
        zoom in 0.1..50.0f64,
        sx in 0.0..800.0f64,
        sy in 0.0..600.0f64,
        delta in -10.0..10.0f64,
    ) {
        let mut vp = viewport(cam_x, cam_y, zoom, 800.0, 600.0);
        let cursor = Point2D::new(sx, sy);
        let before = vp.screen_to_world(cursor);
        vp.scroll(cursor, delta);
        let after = vp.screen_to_world(cursor);
        prop_assert!(close(before, after, 1e-6 * (1.0 + before.length())));
        prop_assert!(vp.zoom() >= 0.05 && vp.zoom() <= 100.0);
    }

    #[test]
    fn drag_moves_world_with_pointer(
        start_x in 0.0..800.0f64,
        start_y in 0.0..600.0f64,
        dx in -300.0..300.0f64,
        dy in -300.0..300.0f64,
        zoom in 0.1..10.0f64,
    ) {
        let mut vp = viewport(0.0, 0.0, zoom, 800.0, 600.0);
        let mut tracker = PointerTracker::new();
        let start = Point2D::new(start_x, start_y);
        let grabbed = vp.screen_to_world(start);

        tracker.pointer_down(&vp, start);
        let end = Point2D::new(start_x + dx, start_y + dy);
        tracker.pointer_move(&mut vp, end);

        // The world point grabbed at the start stays under the pointer
        prop_assert!(close(vp.world_to_screen(grabbed), end, 1e-6 * (1.0 + end.length())));
    }
}

#[test]
fn scroll_direction_matches_wheel_convention() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.scroll(Point2D::new(400.0, 300.0), 120.0);
    assert!((vp.zoom() - 0.9).abs() < 1e-12);

    let mut vp = Viewport::new(800.0, 600.0);
    vp.scroll(Point2D::new(400.0, 300.0), -120.0);
    assert!((vp.zoom() - 1.1).abs() < 1e-12);

    // Zero delta also zooms in
    let mut vp = Viewport::new(800.0, 600.0);
    vp.scroll(Point2D::new(400.0, 300.0), 0.0);
    assert!((vp.zoom() - 1.1).abs() < 1e-12);
}

#[test]
fn zero_movement_drag_still_suppresses_click() {
    let mut vp = Viewport::new(800.0, 600.0);
    let mut tracker = PointerTracker::new();
    let at = Point2D::new(420.0, 310.0);

    tracker.pointer_down(&vp, at);
    tracker.pointer_move(&mut vp, at);
    assert_eq!(tracker.pointer_up(), PointerUp::DragEnd);
    assert_eq!(vp.camera(), Camera::default());
    assert_eq!(tracker.click(&vp, at), None);
}

#[test]
fn resize_changes_conversion() {
    let mut vp = Viewport::new(800.0, 600.0);
    assert!(vp.set_size(1000.0, 500.0));
    assert_eq!(vp.world_to_screen(Point2D::ORIGIN), Point2D::new(500.0, 250.0));
}

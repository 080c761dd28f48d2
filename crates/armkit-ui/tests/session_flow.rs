use armkit_communication::AngleSink;
use armkit_core::{EventDispatcher, JointAngles, Point2D, SceneEvent};
use armkit_settings::Config;
use armkit_ui::{ClickOutcome, Field, Session};
use armkit_visualizer::{Renderer, Scene, SvgRenderer, ViewportSize};
use std::sync::{Arc, Mutex};

// Sink recording every pose it is given
#[derive(Clone, Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl AngleSink for RecordingSink {
    fn send_angles(&mut self, theta0: f64, theta1: f64) {
        self.sent.lock().unwrap().push((theta0, theta1));
    }

    fn is_connected(&self) -> bool {
        true
    }
}

struct CountingRenderer {
    size: ViewportSize,
    frames: Vec<Scene>,
}

impl Renderer for CountingRenderer {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn draw(&mut self, scene: &Scene) {
        self.frames.push(scene.clone());
    }
}

#[test]
fn every_angle_change_reaches_the_device() {
    let sink = RecordingSink::default();
    let sent = Arc::clone(&sink.sent);

    let mut session = Session::default();
    session.set_sink(Box::new(sink));
    assert!(session.is_device_connected());

    session.input(Field::Theta0, "10");
    session.input(Field::Theta1, "20");
    let click = Point2D::new(550.0, 300.0);
    session.pointer_down(click);
    session.pointer_up();
    assert!(matches!(session.click(click), ClickOutcome::Solved(_)));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0], (80.0, -45.0));
    assert_eq!(sent[1], (10.0, -45.0));
    assert_eq!(sent[2], (10.0, 20.0));
    assert!((sent[3].0 - 41.4096).abs() < 1e-3);
}

#[test]
fn drag_then_click_does_not_move_arm() {
    let events = EventDispatcher::default();
    let mut rx = events.subscribe();
    let mut session = Session::default().with_events(events);

    session.pointer_down(Point2D::new(400.0, 300.0));
    session.pointer_move(Point2D::new(400.0, 300.0));
    session.pointer_up();
    assert_eq!(session.click(Point2D::new(550.0, 300.0)), ClickOutcome::Suppressed);
    assert_eq!(session.angles(), JointAngles::default());

    assert_eq!(
        rx.try_recv().unwrap(),
        SceneEvent::CameraChanged {
            x: 0.0,
            y: 0.0,
            zoom: 1.0
        }
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn scroll_publishes_camera_and_marks_dirty() {
    let mut session = Session::default();
    session.clear_dirty();
    session.scroll(Point2D::new(100.0, 100.0), 1.0);
    assert!(session.is_dirty());
    assert!((session.viewport().zoom() - 0.9).abs() < 1e-12);
}

#[test]
fn render_follows_renderer_size() {
    let mut session = Session::default();
    let mut renderer = CountingRenderer {
        size: ViewportSize::new(1000.0, 500.0),
        frames: Vec::new(),
    };
    session.render(&mut renderer);

    assert!(!session.is_dirty());
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(renderer.frames[0].origin, Point2D::new(500.0, 250.0));
}

#[test]
fn svg_render_of_session() {
    let mut session = Session::default();
    let mut renderer = SvgRenderer::new(640.0, 480.0);
    session.render(&mut renderer);
    assert!(renderer.document().contains(r#"width="640""#));
}

#[test]
fn session_from_config_uses_links_and_window() {
    let mut config = Config::default();
    config.arm.l1 = 120.0;
    config.arm.l2 = 80.0;
    config.window.width = 1024.0;
    config.window.height = 768.0;

    let session = Session::from_config(&config).unwrap();
    assert_eq!(session.links().l1(), 120.0);
    assert_eq!(session.field_text(Field::L2), "80");
    assert_eq!(session.viewport().size(), ViewportSize::new(1024.0, 768.0));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.arm.l1 = -1.0;
    assert!(Session::from_config(&config).is_err());
}

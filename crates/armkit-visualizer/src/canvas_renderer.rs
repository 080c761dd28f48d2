//! Scene output as SVG path commands.
//!
//! The `render_*_to_path` functions emit path data for one layer each so a
//! host canvas can stroke them individually; [`SvgRenderer`] wraps all layers
//! into a standalone document.

use crate::scene::{Scene, Segment};
use crate::viewport::ViewportSize;
use std::fmt::Write;

const BACKGROUND: &str = "#ffffff";
const GRID_COLOR: &str = "#e5e5e5";
const AXIS_COLOR: &str = "#000000";
const ORIGIN_COLOR: &str = "#ff0000";
const REACH_COLOR: &str = "rgba(255,0,0,0.5)";
const SQUARE_COLOR: &str = "rgba(0,128,255,0.5)";
const LINK1_COLOR: &str = "#0000ff";
const LINK2_COLOR: &str = "#008000";

const ORIGIN_RADIUS: f64 = 5.0;
const LINK_WIDTH: f64 = 4.0;
const AXIS_WIDTH: f64 = 2.0;

/// Anything that can present a [`Scene`].
pub trait Renderer {
    /// Current drawing surface size in pixels.
    fn size(&self) -> ViewportSize;

    fn draw(&mut self, scene: &Scene);
}

fn push_segment(path: &mut String, segment: &Segment) {
    let _ = write!(
        path,
        "M {:.2} {:.2} L {:.2} {:.2} ",
        segment.from.x, segment.from.y, segment.to.x, segment.to.y
    );
}

/// Render grid as SVG path commands
pub fn render_grid_to_path(scene: &Scene) -> String {
    // ~40 chars per line
    let mut path = String::with_capacity(scene.grid.len() * 40);
    for line in &scene.grid {
        push_segment(&mut path, line);
    }
    path.trim_end().to_string()
}

/// Render both axes as SVG path commands
pub fn render_axes_to_path(scene: &Scene) -> String {
    let mut path = String::new();
    push_segment(&mut path, &scene.x_axis);
    push_segment(&mut path, &scene.y_axis);
    path.trim_end().to_string()
}

/// Render the reach circle followed by the inscribed square as SVG path
/// commands
pub fn render_envelope_to_path(scene: &Scene) -> (String, String) {
    let r = scene.reach_px;
    let c = scene.origin;
    // Two half arcs, a single arc cannot close on its start point
    let circle = format!(
        "M {:.2} {:.2} A {r:.2} {r:.2} 0 1 0 {:.2} {:.2} A {r:.2} {r:.2} 0 1 0 {:.2} {:.2} Z",
        c.x - r,
        c.y,
        c.x + r,
        c.y,
        c.x - r,
        c.y,
    );

    let sq = scene.work_square;
    let square = format!(
        "M {:.2} {:.2} h {:.2} v {:.2} h {:.2} Z",
        sq.origin.x, sq.origin.y, sq.width, sq.height, -sq.width
    );

    (circle, square)
}

/// Render link 1 and link 2 as separate SVG path commands
pub fn render_arm_to_path(scene: &Scene) -> (String, String) {
    let mut link1 = String::new();
    let mut link2 = String::new();
    push_segment(&mut link1, &scene.link1);
    push_segment(&mut link2, &scene.link2);
    (link1.trim_end().to_string(), link2.trim_end().to_string())
}

/// Renders scenes to a standalone SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    size: ViewportSize,
    document: String,
    frames: u64,
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = ViewportSize::new(width, height);
    }

    /// Document produced by the last [`Renderer::draw`] call.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SvgRenderer {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn draw(&mut self, scene: &Scene) {
        let (circle, square) = render_envelope_to_path(scene);
        let (link1, link2) = render_arm_to_path(scene);

        let mut doc = String::with_capacity(1024 + scene.grid.len() * 40);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.width,
            h = scene.height
        );
        let _ = writeln!(
            doc,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{BACKGROUND}"/>"#,
            scene.width, scene.height
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{}" stroke="{GRID_COLOR}" stroke-width="1" fill="none"/>"#,
            render_grid_to_path(scene)
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{}" stroke="{AXIS_COLOR}" stroke-width="{AXIS_WIDTH}" fill="none"/>"#,
            render_axes_to_path(scene)
        );
        let _ = writeln!(
            doc,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{ORIGIN_RADIUS}" fill="{ORIGIN_COLOR}"/>"#,
            scene.origin.x, scene.origin.y
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{circle}" stroke="{REACH_COLOR}" stroke-width="1" fill="none"/>"#
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{square}" stroke="{SQUARE_COLOR}" stroke-width="1" stroke-dasharray="6 4" fill="none"/>"#
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{link1}" stroke="{LINK1_COLOR}" stroke-width="{LINK_WIDTH}" stroke-linecap="round" fill="none"/>"#
        );
        let _ = writeln!(
            doc,
            r#"  <path d="{link2}" stroke="{LINK2_COLOR}" stroke-width="{LINK_WIDTH}" stroke-linecap="round" fill="none"/>"#
        );
        doc.push_str("</svg>\n");

        self.document = doc;
        self.frames += 1;
        tracing::trace!("Rendered frame {} ({} bytes)", self.frames, self.document.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;
    use armkit_core::{JointAngles, LinkLengths};

    fn scene() -> Scene {
        Scene::build(
            &Viewport::new(800.0, 600.0),
            &LinkLengths::default(),
            &JointAngles::new(0.0, 0.0),
        )
    }

    #[test]
    fn test_render_arm_paths() {
        let (link1, link2) = render_arm_to_path(&scene());
        assert_eq!(link1, "M 400.00 300.00 L 500.00 300.00");
        assert_eq!(link2, "M 500.00 300.00 L 600.00 300.00");
    }

    #[test]
    fn test_render_axes_path() {
        assert_eq!(
            render_axes_to_path(&scene()),
            "M 0.00 300.00 L 800.00 300.00 M 400.00 0.00 L 400.00 600.00"
        );
    }

    #[test]
    fn test_grid_path_has_one_move_per_line() {
        let scene = scene();
        let path = render_grid_to_path(&scene);
        assert_eq!(path.matches('M').count(), scene.grid.len());
    }

    #[test]
    fn test_envelope_circle_uses_pixel_radius() {
        let (circle, square) = render_envelope_to_path(&scene());
        assert!(circle.starts_with("M 200.00 300.00 A 200.00 200.00"));
        assert!(square.starts_with("M 400.00 158.58"));
    }

    #[test]
    fn test_svg_document_contains_layers() {
        let mut renderer = SvgRenderer::new(800.0, 600.0);
        renderer.draw(&scene());
        let doc = renderer.document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(GRID_COLOR));
        assert!(doc.contains(r#"stroke-dasharray="6 4""#));
        assert!(doc.contains(r#"r="5""#));
        assert_eq!(renderer.frames(), 1);
    }
}

//! Screen-space geometry for a single frame.
//!
//! A [`Scene`] is derived entirely from the viewport, the link lengths and the
//! current joint angles, so renderers never touch world coordinates.

use crate::viewport::Viewport;
use armkit_core::{JointAngles, LinkLengths, Point2D};
use armkit_kinematics::{forward, inscribed_square_side};

/// Upper bound on grid lines per axis, guards against degenerate zoom/spacing.
const MAX_GRID_LINES: i64 = 10_000;

/// Line segment in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point2D,
    pub to: Point2D,
}

impl Segment {
    pub fn new(from: Point2D, to: Point2D) -> Self {
        Self { from, to }
    }
}

/// Axis-aligned rectangle in screen pixels, `origin` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point2D,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub grid: Vec<Segment>,
    pub x_axis: Segment,
    pub y_axis: Segment,
    /// Screen position of the world origin (the arm base).
    pub origin: Point2D,
    /// Maximum reach in world units.
    pub reach: f64,
    /// Maximum reach in pixels.
    pub reach_px: f64,
    /// Square inscribed in the reach circle, first quadrant.
    pub work_square: Rect,
    pub link1: Segment,
    pub link2: Segment,
}

impl Scene {
    pub fn build(viewport: &Viewport, links: &LinkLengths, angles: &JointAngles) -> Self {
        let size = viewport.size();
        let zoom = viewport.zoom();
        let origin = viewport.world_to_screen(Point2D::ORIGIN);

        let reach = links.max_reach();
        let side = inscribed_square_side(links);
        let square_top_left = viewport.world_to_screen(Point2D::new(0.0, side));

        let pose = forward(angles, links);
        let joint = viewport.world_to_screen(pose.joint);
        let end = viewport.world_to_screen(pose.end);

        Self {
            width: size.width,
            height: size.height,
            grid: grid_lines(viewport),
            x_axis: Segment::new(
                Point2D::new(0.0, origin.y),
                Point2D::new(size.width, origin.y),
            ),
            y_axis: Segment::new(
                Point2D::new(origin.x, 0.0),
                Point2D::new(origin.x, size.height),
            ),
            origin,
            reach,
            reach_px: reach * zoom,
            work_square: Rect {
                origin: square_top_left,
                width: side * zoom,
                height: side * zoom,
            },
            link1: Segment::new(origin, joint),
            link2: Segment::new(joint, end),
        }
    }
}

/// Grid lines at multiples of the configured spacing covering the visible
/// world rectangle. Vertical lines come first.
fn grid_lines(viewport: &Viewport) -> Vec<Segment> {
    let spacing = viewport.config().grid_spacing;
    if !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }

    let size = viewport.size();
    let (bottom_left, top_right) = viewport.visible_world();

    let x_range = index_range(bottom_left.x, top_right.x, spacing);
    let y_range = index_range(bottom_left.y, top_right.y, spacing);

    let mut lines = Vec::with_capacity(x_range.clone().count() + y_range.clone().count());

    for i in x_range {
        let sx = viewport.world_to_screen(Point2D::new(i as f64 * spacing, 0.0)).x;
        lines.push(Segment::new(
            Point2D::new(sx, 0.0),
            Point2D::new(sx, size.height),
        ));
    }

    for j in y_range {
        let sy = viewport.world_to_screen(Point2D::new(0.0, j as f64 * spacing)).y;
        lines.push(Segment::new(
            Point2D::new(0.0, sy),
            Point2D::new(size.width, sy),
        ));
    }

    lines
}

// Integer steps avoid the drift of accumulating `x += spacing`.
fn index_range(min: f64, max: f64, spacing: f64) -> std::ops::RangeInclusive<i64> {
    let first = (min / spacing).ceil();
    let last = (max / spacing).floor();
    if !(first.is_finite() && last.is_finite()) || last < first {
        return 1..=0;
    }

    let first = first as i64;
    let last = (last as i64).min(first.saturating_add(MAX_GRID_LINES - 1));
    first..=last
}

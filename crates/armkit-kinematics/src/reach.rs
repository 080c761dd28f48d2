//! Reachable workspace of the arm.

use armkit_core::{LinkLengths, Point2D};

/// Whether `point` lies in the closed annulus `[|l1 - l2|, l1 + l2]`.
///
/// The base joint itself only counts when both links are equal.
pub fn is_reachable(point: Point2D, links: &LinkLengths) -> bool {
    let d = point.length();
    if d == 0.0 {
        return links.l1() == links.l2();
    }
    d.is_finite() && d >= links.min_reach() && d <= links.max_reach()
}

/// Side of the largest axis-aligned square with one corner on the base joint
/// that fits inside the outer reach circle (first quadrant).
pub fn inscribed_square_side(links: &LinkLengths) -> f64 {
    links.max_reach() / std::f64::consts::SQRT_2
}

//! Two-link inverse kinematics (law of cosines).
//!
//! The solver returns a single branch: the base angle is the bearing to the
//! target plus the link-1 offset (`a + b`), and the elbow angle is the
//! interior elbow angle minus π (`c - π`). The mirrored `a - b` configuration
//! is never produced.

use armkit_core::{JointAngles, KinematicsError, LinkLengths, Point2D};
use std::f64::consts::PI;

/// Inverse kinematics seam used by the session.
pub trait Solver: Send + Sync {
    /// Computes joint angles that place the end effector on `target`.
    fn solve(&self, target: Point2D, links: &LinkLengths) -> Result<JointAngles, KinematicsError>;
}

/// The law-of-cosines solver for a planar two-link arm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoLinkSolver;

impl Solver for TwoLinkSolver {
    fn solve(&self, target: Point2D, links: &LinkLengths) -> Result<JointAngles, KinematicsError> {
        solve(target, links)
    }
}

/// Solves for the joint angles that reach `target`.
///
/// Fails with [`KinematicsError::Unreachable`] when the target lies outside
/// the annulus `[|l1 - l2|, l1 + l2]`, is not finite, or sits on the base
/// joint while the links differ in length. A target on the base joint with
/// equal links folds the elbow back completely (`θ0 = 0°`, `θ1 = -180°`).
///
/// The annulus bounds are exact, matching [`crate::is_reachable`]. The
/// cosines are computed on lengths scaled by the longest link so that very
/// large or very small arms neither overflow nor underflow.
pub fn solve(target: Point2D, links: &LinkLengths) -> Result<JointAngles, KinematicsError> {
    let l1 = links.l1();
    let l2 = links.l2();
    let d = target.length();

    let unreachable = || KinematicsError::Unreachable {
        distance: d,
        min_reach: links.min_reach(),
        max_reach: links.max_reach(),
    };

    if !d.is_finite() {
        return Err(unreachable());
    }

    if d == 0.0 {
        return if l1 == l2 {
            Ok(JointAngles::new(0.0, -180.0))
        } else {
            Err(unreachable())
        };
    }

    if d > links.max_reach() || d < links.min_reach() {
        return Err(unreachable());
    }

    let scale = l1.max(l2);
    let (p, q, r) = (l1 / scale, l2 / scale, d / scale);

    let a = target.y.atan2(target.x);
    let b = clamp_unit((p * p + r * r - q * q) / (2.0 * p * r)).acos();
    let c = clamp_unit((p * p + q * q - r * r) / (2.0 * p * q)).acos();

    let angles = JointAngles::new((a + b).to_degrees(), (c - PI).to_degrees());
    if !angles.is_finite() {
        tracing::warn!("no finite solution for {} with links {:?}", target, links);
        return Err(unreachable());
    }
    tracing::debug!("solved {} -> {}", target, angles);
    Ok(angles)
}

// Rounding can push a boundary target's cosine just past ±1.
fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

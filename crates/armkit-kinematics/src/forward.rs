//! Forward kinematics.

use armkit_core::{JointAngles, LinkLengths, Point2D};

/// World positions of the arm's joints for a given set of angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    /// Base joint, always at the world origin.
    pub base: Point2D,
    /// Elbow joint at the end of link 1.
    pub joint: Point2D,
    /// End effector at the end of link 2.
    pub end: Point2D,
}

/// Places both links for the given angles.
///
/// `theta1` is relative to link 1, so link 2 points along `theta0 + theta1`.
pub fn forward(angles: &JointAngles, links: &LinkLengths) -> ArmPose {
    let t0 = angles.theta0.to_radians();
    let t01 = t0 + angles.theta1.to_radians();

    let joint = Point2D::new(links.l1() * t0.cos(), links.l1() * t0.sin());
    let end = joint + Point2D::new(links.l2() * t01.cos(), links.l2() * t01.sin());

    ArmPose {
        base: Point2D::ORIGIN,
        joint,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_arm_along_x() {
        let links = LinkLengths::new(100.0, 50.0).unwrap();
        let pose = forward(&JointAngles::new(0.0, 0.0), &links);
        assert_eq!(pose.joint, Point2D::new(100.0, 0.0));
        assert_eq!(pose.end, Point2D::new(150.0, 0.0));
    }

    #[test]
    fn test_elbow_is_relative_to_first_link() {
        let links = LinkLengths::new(1.0, 1.0).unwrap();
        let pose = forward(&JointAngles::new(90.0, -90.0), &links);
        assert!((pose.joint.x - 0.0).abs() < 1e-12);
        assert!((pose.joint.y - 1.0).abs() < 1e-12);
        assert!((pose.end.x - 1.0).abs() < 1e-12);
        assert!((pose.end.y - 1.0).abs() < 1e-12);
    }
}

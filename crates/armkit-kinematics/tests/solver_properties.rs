//! Property tests for the two-link solver

use armkit_core::{LinkLengths, Point2D};
use armkit_kinematics::{forward, is_reachable, solve, Solver, TwoLinkSolver};
use proptest::prelude::*;

fn arm() -> impl Strategy<Value = (f64, f64)> {
    (1.0f64..500.0, 1.0f64..500.0)
}

proptest! {
    #[test]
    fn forward_of_solution_reaches_target(
        (l1, l2) in arm(),
        fraction in 0.01f64..0.99,
        bearing in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let links = LinkLengths::new(l1, l2).unwrap();
        let d = links.min_reach() + (links.max_reach() - links.min_reach()) * fraction;
        prop_assume!(d > 1e-3);
        let target = Point2D::new(d * bearing.cos(), d * bearing.sin());

        let angles = solve(target, &links).unwrap();
        prop_assert!(angles.is_finite());

        let pose = forward(&angles, &links);
        prop_assert!((pose.end.x - target.x).abs() < 1e-6, "{:?} vs {:?}", pose.end, target);
        prop_assert!((pose.end.y - target.y).abs() < 1e-6, "{:?} vs {:?}", pose.end, target);
    }

    #[test]
    fn beyond_outer_radius_is_unreachable(
        (l1, l2) in arm(),
        excess in 1e-3f64..1000.0,
        bearing in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let links = LinkLengths::new(l1, l2).unwrap();
        let d = links.max_reach() + excess;
        let target = Point2D::new(d * bearing.cos(), d * bearing.sin());
        prop_assert!(solve(target, &links).is_err());
        prop_assert!(!is_reachable(target, &links));
    }

    #[test]
    fn solver_and_reach_check_agree_just_past_outer_radius(
        (l1, l2) in arm(),
        excess in 1e-12f64..1e-3,
    ) {
        let links = LinkLengths::new(l1, l2).unwrap();
        let target = Point2D::new(links.max_reach() * (1.0 + excess), 0.0);
        prop_assert!(!is_reachable(target, &links));
        prop_assert!(solve(target, &links).is_err());
    }

    #[test]
    fn solver_and_reach_check_agree_just_inside_inner_radius(
        l1 in 10.0f64..500.0,
        ratio in 0.1f64..0.9,
        excess in 1e-12f64..1e-3,
    ) {
        let links = LinkLengths::new(l1, l1 * ratio).unwrap();
        let target = Point2D::new(0.0, links.min_reach() * (1.0 - excess));
        prop_assert!(!is_reachable(target, &links));
        prop_assert!(solve(target, &links).is_err());
    }

    #[test]
    fn inside_inner_radius_is_unreachable(
        l1 in 10.0f64..500.0,
        ratio in 0.1f64..0.9,
        fraction in 0.0f64..0.99,
        bearing in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let links = LinkLengths::new(l1, l1 * ratio).unwrap();
        let d = links.min_reach() * fraction;
        let target = Point2D::new(d * bearing.cos(), d * bearing.sin());
        prop_assert!(solve(target, &links).is_err());
    }
}

#[test]
fn test_reference_case_150() {
    let links = LinkLengths::new(100.0, 100.0).unwrap();
    let angles = TwoLinkSolver.solve(Point2D::new(150.0, 0.0), &links).unwrap();

    assert!((angles.theta0 - 41.4096).abs() < 1e-3);
    assert!((angles.theta1 - (-82.8192)).abs() < 1e-3);
}

#[test]
fn test_reference_case_300_is_unreachable() {
    let links = LinkLengths::new(100.0, 100.0).unwrap();
    let err = solve(Point2D::new(300.0, 0.0), &links).unwrap_err();
    assert!(err.to_string().contains("unreachable"));
}

#[test]
fn test_inner_boundary_is_reachable() {
    let links = LinkLengths::new(100.0, 40.0).unwrap();
    let target = Point2D::new(0.0, -60.0);
    let angles = solve(target, &links).unwrap();
    let pose = forward(&angles, &links);
    assert!((pose.end.x - target.x).abs() < 1e-6);
    assert!((pose.end.y - target.y).abs() < 1e-6);
}

//! # ArmKit Kinematics
//!
//! Planar kinematics for a two-link arm whose base joint sits at the world
//! origin.
//!
//! - [`solve`] maps a world target to joint angles (inverse kinematics)
//! - [`forward`] maps joint angles back to joint and end-effector positions
//! - [`reach`] exposes the reachable annulus used to draw the arm's envelope

pub mod forward;
pub mod reach;
pub mod solver;

pub use forward::{forward, ArmPose};
pub use reach::{inscribed_square_side, is_reachable};
pub use solver::{solve, Solver, TwoLinkSolver};

//! Kinematic data model.
//!
//! World points and screen points share [`Point2D`]; the two spaces are only
//! ever converted through the viewport transform.

use crate::error::KinematicsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (*self - *other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Lengths of the two arm links.
///
/// Both lengths are positive and finite; use [`LinkLengths::new`] to build one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLengths {
    l1: f64,
    l2: f64,
}

impl LinkLengths {
    /// Creates link lengths, rejecting zero, negative and non-finite values.
    pub fn new(l1: f64, l2: f64) -> Result<Self, KinematicsError> {
        validate_length("l1", l1)?;
        validate_length("l2", l2)?;
        Ok(Self { l1, l2 })
    }

    pub fn l1(&self) -> f64 {
        self.l1
    }

    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Returns a copy with a new first link length.
    pub fn with_l1(self, l1: f64) -> Result<Self, KinematicsError> {
        Self::new(l1, self.l2)
    }

    /// Returns a copy with a new second link length.
    pub fn with_l2(self, l2: f64) -> Result<Self, KinematicsError> {
        Self::new(self.l1, l2)
    }

    /// Outer radius of the reachable annulus.
    pub fn max_reach(&self) -> f64 {
        self.l1 + self.l2
    }

    /// Inner radius of the reachable annulus.
    pub fn min_reach(&self) -> f64 {
        (self.l1 - self.l2).abs()
    }
}

impl Default for LinkLengths {
    fn default() -> Self {
        Self {
            l1: crate::constants::DEFAULT_L1,
            l2: crate::constants::DEFAULT_L2,
        }
    }
}

fn validate_length(link: &'static str, value: f64) -> Result<(), KinematicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidLinkLength { link, value })
    }
}

/// Joint angles in degrees.
///
/// `theta0` is measured from the positive x-axis; `theta1` is the elbow
/// angle relative to the direction of the first link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub theta0: f64,
    pub theta1: f64,
}

impl JointAngles {
    pub fn new(theta0: f64, theta1: f64) -> Self {
        Self { theta0, theta1 }
    }

    pub fn is_finite(&self) -> bool {
        self.theta0.is_finite() && self.theta1.is_finite()
    }
}

impl Default for JointAngles {
    fn default() -> Self {
        Self {
            theta0: crate::constants::DEFAULT_THETA0,
            theta1: crate::constants::DEFAULT_THETA1,
        }
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "θ0={:.2}° θ1={:.2}°", self.theta0, self.theta1)
    }
}

//! # ArmKit Core
//!
//! Core types, errors, and events shared by every ArmKit crate.
//! Provides the kinematic data model (points, link lengths, joint angles),
//! the unified error type and the scene event dispatcher used to trigger
//! redraws.

pub mod constants;
pub mod error;
pub mod event;
pub mod types;

pub use error::{ConfigError, ConnectionError, Error, KinematicsError, ProtocolError, Result};

pub use event::{EventDispatcher, SceneEvent};

pub use types::{JointAngles, LinkLengths, Point2D};

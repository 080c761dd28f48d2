//! Error handling for ArmKit
//!
//! Provides error types for all layers of the application:
//! - Kinematics errors (invalid links, unreachable targets)
//! - Connection errors (serial port)
//! - Protocol errors (device command frames)
//! - Configuration errors (loading/validating settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Kinematics error type
///
/// Raised by the solver and by the validating constructors of the
/// kinematic data model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Target lies outside the reachable annulus
    #[error("Target at distance {distance} is unreachable (reach {min_reach}..={max_reach})")]
    Unreachable {
        /// Distance from the base joint to the target.
        distance: f64,
        /// Inner radius of the reachable annulus.
        min_reach: f64,
        /// Outer radius of the reachable annulus.
        max_reach: f64,
    },

    /// Link length is not a positive finite number
    #[error("Invalid length for {link}: {value}")]
    InvalidLinkLength {
        /// Which link was rejected ("l1" or "l2").
        link: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Connection error type
///
/// Represents errors related to the serial link to the servo controller.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// Channel is not connected
    #[error("Device not connected")]
    NotConnected,

    /// Channel is already connected
    #[error("Device already connected to {port}")]
    AlreadyConnected {
        /// The port currently in use.
        port: String,
    },

    /// Failed to open port
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },

    /// Connection lost
    #[error("Connection lost: {reason}")]
    ConnectionLost {
        /// The reason the connection was lost.
        reason: String,
    },

    /// Port enumeration failed
    #[error("Failed to enumerate ports: {reason}")]
    Enumeration {
        /// The reason enumeration failed.
        reason: String,
    },

    /// Invalid connection parameters
    #[error("Invalid connection parameters: {reason}")]
    InvalidParameters {
        /// The reason the parameters are invalid.
        reason: String,
    },
}

/// Device protocol error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Frame has the wrong length
    #[error("Frame must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected frame length.
        expected: usize,
        /// Actual frame length.
        actual: usize,
    },

    /// Checksum did not match
    #[error("Checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum computed over the frame.
        expected: u8,
        /// Checksum carried by the frame.
        actual: u8,
    },

    /// Unknown command byte
    #[error("Unknown command 0x{command:02X}")]
    UnknownCommand {
        /// The command byte received.
        command: u8,
    },

    /// Angle is not a finite number
    #[error("Angle {value} cannot be encoded")]
    InvalidAngle {
        /// The rejected angle.
        value: f64,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// A configuration value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The file extension is not supported
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Parsing or serializing the file failed
    #[error("Config format error: {0}")]
    Format(String),

    /// Config directory could not be determined
    #[error("Config directory unavailable")]
    NoConfigDirectory,
}

/// Main error type for ArmKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Kinematics error
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an unreachable-target error
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Kinematics(KinematicsError::Unreachable { .. }))
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_classification() {
        let err: Error = KinematicsError::Unreachable {
            distance: 300.0,
            min_reach: 0.0,
            max_reach: 200.0,
        }
        .into();
        assert!(err.is_unreachable());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_checksum_message_is_hex() {
        let err = ProtocolError::ChecksumMismatch {
            expected: 0x0A,
            actual: 0xFF,
        };
        assert_eq!(
            err.to_string(),
            "Checksum mismatch: expected 0x0A, got 0xFF"
        );
    }

    #[test]
    fn test_invalid_angle_compares_by_value() {
        let err = ProtocolError::InvalidAngle { value: 12.5 };
        assert_eq!(err, ProtocolError::InvalidAngle { value: 12.5 });
        assert_ne!(err, ProtocolError::InvalidAngle { value: f64::NAN });
    }
}

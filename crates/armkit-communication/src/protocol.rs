//! Servo controller wire protocol
//!
//! Every command is a fixed five-byte frame:
//!
//! ```text
//! [command, data0, data1, data2, checksum]
//! ```
//!
//! The only command is `0x01` (set servo positions): `data0` is the base
//! servo position, `data1` the elbow servo position and `data2` is unused.
//! The checksum is the XOR of the four preceding bytes.

use armkit_core::ProtocolError;
use std::collections::VecDeque;

/// Set both servo positions.
pub const COMMAND_SET_SERVO_POSITION: u8 = 0x01;

/// Length of every frame on the wire.
pub const FRAME_LEN: usize = 5;

/// Offset subtracted from the elbow angle before it is sent.
pub const ELBOW_OFFSET_DEG: f64 = 90.0;

/// Size of the controller's receive ring buffer.
const DECODER_CAPACITY: usize = 32;

/// XOR of all bytes.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Converts an angle to its byte on the wire: rounded to the nearest degree
/// and wrapped modulo 256.
fn angle_to_byte(value: f64) -> Result<u8, ProtocolError> {
    if !value.is_finite() {
        return Err(ProtocolError::InvalidAngle { value });
    }
    Ok((value.round() as i64).rem_euclid(256) as u8)
}

/// A decoded "set servo positions" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCommand {
    /// Base servo position byte.
    pub base: u8,
    /// Elbow servo position byte.
    pub elbow: u8,
}

impl ServoCommand {
    /// Builds the command for joint angles in the solver's convention.
    ///
    /// `theta0` is sent unshifted, `theta1` is shifted by -90°.
    pub fn from_angles(theta0: f64, theta1: f64) -> Result<Self, ProtocolError> {
        Ok(Self {
            base: angle_to_byte(theta0)?,
            elbow: angle_to_byte(theta1 - ELBOW_OFFSET_DEG)?,
        })
    }

    /// Serializes the command into a frame.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut frame = [COMMAND_SET_SERVO_POSITION, self.base, self.elbow, 0x00, 0x00];
        frame[FRAME_LEN - 1] = checksum(&frame[..FRAME_LEN - 1]);
        frame
    }

    /// Parses a frame, validating length, command and checksum.
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() != FRAME_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: FRAME_LEN,
                actual: frame.len(),
            });
        }

        let expected = checksum(&frame[..FRAME_LEN - 1]);
        let actual = frame[FRAME_LEN - 1];
        if expected != actual {
            return Err(ProtocolError::ChecksumMismatch { expected, actual });
        }

        if frame[0] != COMMAND_SET_SERVO_POSITION {
            return Err(ProtocolError::UnknownCommand { command: frame[0] });
        }

        Ok(Self {
            base: frame[1],
            elbow: frame[2],
        })
    }
}

/// Incremental frame decoder with the controller's 32-byte receive buffer.
///
/// Bytes are consumed in fixed five-byte groups. When more than 32 bytes are
/// pending the oldest bytes are discarded, as the firmware's ring buffer
/// overwrites them.
#[derive(Debug, Default)]
pub struct PacketDecoder {
    buffer: VecDeque<u8>,
    overflowed: usize,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends received bytes.
    pub fn push(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.buffer.len() == DECODER_CAPACITY {
                self.buffer.pop_front();
                self.overflowed += 1;
            }
            self.buffer.push_back(byte);
        }
        if self.overflowed > 0 {
            tracing::debug!("decoder buffer overflowed by {} bytes", self.overflowed);
        }
    }

    /// Number of bytes waiting to be decoded.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes dropped because the buffer was full.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    /// Decodes the next frame if five bytes are available.
    pub fn next_packet(&mut self) -> Option<Result<ServoCommand, ProtocolError>> {
        if self.buffer.len() < FRAME_LEN {
            return None;
        }
        let frame: Vec<u8> = self.buffer.drain(..FRAME_LEN).collect();
        Some(ServoCommand::decode(&frame))
    }
}

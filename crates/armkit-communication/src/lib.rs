//! # ArmKit Communication
//!
//! Serial link to the servo controller.
//! Includes the fixed five-byte command frame, a decoder matching the
//! controller firmware, port discovery and a fire-and-forget device channel.

pub mod channel;
pub mod protocol;
pub mod serial;

pub use channel::{AngleSink, ChannelStats, DeviceChannel, NullSink, OutboundSlot};
pub use protocol::{checksum, PacketDecoder, ServoCommand, COMMAND_SET_SERVO_POSITION, FRAME_LEN};
pub use serial::{list_ports, open_port, ConnectionParams, ReadWrite, SerialPortInfo};

//! # Sensor Link Protocol
//!
//! Fixed, versioned binary wire protocol shared by two sensor nodes and one
//! control node over a short-range wireless link.
//!
//! The crate defines the packet layouts, scaling and clamping rules, flag
//! bit-masks and the pack/unpack functions that every endpoint must agree on
//! byte for byte. Transport setup, advertising and characteristic registration
//! belong to the caller; the codec only ever sees byte slices.
//!
//! ## Packets
//! | Packet | Size | Direction |
//! |---|---|---|
//! | Telemetry | 14 B | sensor → control, periodic |
//! | Event | 7 B | sensor → control, edge-triggered |
//! | Control | 8 B | control → sensor |
//!
//! ## Example
//! ```rust
//! use sensor_link_protocol::{make_telemetry, pack_telemetry, NodeId, TelemetryFlag};
//! use sensor_link_protocol::core::packet::TELEMETRY_WIRE_SIZE;
//!
//! let mut packet = make_telemetry(NodeId::SensorNode2);
//! packet.flags.set(TelemetryFlag::HelpActive, true);
//! packet.primary_value = 2250;
//!
//! let mut buf = [0u8; TELEMETRY_WIRE_SIZE];
//! pack_telemetry(&packet, &mut buf).unwrap();
//! assert_eq!(buf[0], 1);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::codec::{
    clamp_duty, make_control, make_event, make_telemetry, pack_control, pack_event,
    pack_telemetry, unpack_control, unpack_event, unpack_telemetry, validate_version,
};
pub use crate::core::flags::{ControlFlag, ControlFlags, TelemetryFlag, TelemetryFlags};
pub use crate::core::packet::{ControlPacket, EventPacket, TelemetryPacket};
pub use crate::core::registry::{EventType, NodeId, ProtocolVersion};
pub use error::{ProtocolError, Result};

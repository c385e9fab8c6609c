//! # Packet Layouts
//!
//! The three fixed-size records carried over the link.
//!
//! Every field is written at its declared offset with its declared width and
//! signedness, least-significant byte first. Nothing here depends on the
//! in-memory layout of the Rust structs.
//!
//! ## Wire Format
//! ```text
//! Telemetry (14): [Ver(1)] [Node(1)] [Flags(2)] [Primary(2,i)] [Secondary(2,i)]
//!                 [PotRaw(2)] [Duty(2)] [Reserved(2)]
//! Event      (7): [Ver(1)] [Node(1)] [Type(1)] [Value(2,i)] [TimestampMod(2)]
//! Control    (8): [Ver(1)] [Target(1)] [Flags(2)] [DutyOverride(2)] [Reserved(2)]
//! ```
//!
//! Version, node id and event type are stored as the raw bytes received so a
//! decoded packet re-encodes to exactly the same bytes. Use the typed accessors
//! to interpret them.

use crate::core::flags::{ControlFlags, TelemetryFlags};
use crate::core::registry::{EventType, NodeId, ProtocolVersion};
use crate::error::Result;
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use std::mem::size_of;

/// Wire size of [`TelemetryPacket`] in bytes
pub const TELEMETRY_WIRE_SIZE: usize = 14;

/// Wire size of [`EventPacket`] in bytes
pub const EVENT_WIRE_SIZE: usize = 7;

/// Wire size of [`ControlPacket`] in bytes
pub const CONTROL_WIRE_SIZE: usize = 8;

// Field widths must add up to the advertised sizes.
const _: () = assert!(
    TELEMETRY_WIRE_SIZE
        == size_of::<u8>() * 2 + size_of::<u16>() + size_of::<i16>() * 2 + size_of::<u16>() * 3
);
const _: () = assert!(
    EVENT_WIRE_SIZE == size_of::<u8>() * 3 + size_of::<i16>() + size_of::<u16>()
);
const _: () = assert!(CONTROL_WIRE_SIZE == size_of::<u8>() * 2 + size_of::<u16>() * 3);

/// A fixed-size record with an explicit little-endian field layout.
pub trait WirePacket: Sized {
    /// Exact number of bytes on the wire
    const WIRE_SIZE: usize;

    /// Short packet name used in logs
    const KIND: &'static str;

    /// Raw version byte carried by this packet
    fn version_byte(&self) -> u8;

    /// Append all fields in declared order. Caller guarantees `WIRE_SIZE` bytes of room.
    fn put_fields<B: BufMut>(&self, buf: &mut B);

    /// Read all fields in declared order. Caller guarantees `WIRE_SIZE` bytes remain.
    fn get_fields<B: Buf>(buf: &mut B) -> Self;
}

/// Periodic status record sent from a sensor node to the control node.
///
/// Field meaning depends on the originating node:
/// - SN1: `primary_value` is illuminance in deci-lux, `secondary_value` bit 0 is motion.
/// - SN2: `primary_value` is temperature in centi-°C, `secondary_value` bit 0 is sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelemetryPacket {
    pub protocol_version: u8,
    pub node_id: u8,
    pub flags: TelemetryFlags,
    pub primary_value: i16,
    pub secondary_value: i16,
    pub potentiometer_raw: u16,
    /// Duty cycle currently driven, per-mille
    pub duty_commanded: u16,
    pub reserved: u16,
}

/// Edge-triggered notification sent from a sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventPacket {
    pub protocol_version: u8,
    pub node_id: u8,
    pub event_type: u8,
    pub event_value: i16,
    /// Sender uptime in milliseconds, modulo 65536
    pub timestamp_ms_mod: u16,
}

/// Command written by the control node into a sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlPacket {
    pub protocol_version: u8,
    pub target_node_id: u8,
    pub command_flags: ControlFlags,
    /// Requested duty cycle, per-mille (0..=1000)
    pub duty_override: u16,
    pub reserved: u16,
}

impl TelemetryPacket {
    pub fn version(&self) -> Result<ProtocolVersion> {
        ProtocolVersion::try_from(self.protocol_version)
    }

    pub fn node(&self) -> Result<NodeId> {
        NodeId::try_from(self.node_id)
    }

    /// Bit 0 of the secondary value: motion (SN1) or sound (SN2)
    pub fn secondary_bit(&self) -> bool {
        self.secondary_value & 1 != 0
    }

    pub fn to_bytes(&self) -> [u8; TELEMETRY_WIRE_SIZE] {
        let mut out = [0u8; TELEMETRY_WIRE_SIZE];
        self.put_fields(&mut &mut out[..]);
        out
    }

    pub fn from_bytes(bytes: &[u8; TELEMETRY_WIRE_SIZE]) -> Self {
        Self::get_fields(&mut &bytes[..])
    }
}

impl WirePacket for TelemetryPacket {
    const WIRE_SIZE: usize = TELEMETRY_WIRE_SIZE;
    const KIND: &'static str = "telemetry";

    fn version_byte(&self) -> u8 {
        self.protocol_version
    }

    fn put_fields<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.protocol_version);
        buf.put_u8(self.node_id);
        buf.put_u16_le(self.flags.bits());
        buf.put_i16_le(self.primary_value);
        buf.put_i16_le(self.secondary_value);
        buf.put_u16_le(self.potentiometer_raw);
        buf.put_u16_le(self.duty_commanded);
        buf.put_u16_le(self.reserved);
    }

    fn get_fields<B: Buf>(buf: &mut B) -> Self {
        Self {
            protocol_version: buf.get_u8(),
            node_id: buf.get_u8(),
            flags: TelemetryFlags::from_bits(buf.get_u16_le()),
            primary_value: buf.get_i16_le(),
            secondary_value: buf.get_i16_le(),
            potentiometer_raw: buf.get_u16_le(),
            duty_commanded: buf.get_u16_le(),
            reserved: buf.get_u16_le(),
        }
    }
}

impl EventPacket {
    pub fn version(&self) -> Result<ProtocolVersion> {
        ProtocolVersion::try_from(self.protocol_version)
    }

    pub fn node(&self) -> Result<NodeId> {
        NodeId::try_from(self.node_id)
    }

    pub fn kind(&self) -> Result<EventType> {
        EventType::try_from(self.event_type)
    }

    pub fn to_bytes(&self) -> [u8; EVENT_WIRE_SIZE] {
        let mut out = [0u8; EVENT_WIRE_SIZE];
        self.put_fields(&mut &mut out[..]);
        out
    }

    pub fn from_bytes(bytes: &[u8; EVENT_WIRE_SIZE]) -> Self {
        Self::get_fields(&mut &bytes[..])
    }
}

impl WirePacket for EventPacket {
    const WIRE_SIZE: usize = EVENT_WIRE_SIZE;
    const KIND: &'static str = "event";

    fn version_byte(&self) -> u8 {
        self.protocol_version
    }

    fn put_fields<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.protocol_version);
        buf.put_u8(self.node_id);
        buf.put_u8(self.event_type);
        buf.put_i16_le(self.event_value);
        buf.put_u16_le(self.timestamp_ms_mod);
    }

    fn get_fields<B: Buf>(buf: &mut B) -> Self {
        Self {
            protocol_version: buf.get_u8(),
            node_id: buf.get_u8(),
            event_type: buf.get_u8(),
            event_value: buf.get_i16_le(),
            timestamp_ms_mod: buf.get_u16_le(),
        }
    }
}

impl ControlPacket {
    pub fn version(&self) -> Result<ProtocolVersion> {
        ProtocolVersion::try_from(self.protocol_version)
    }

    pub fn target(&self) -> Result<NodeId> {
        NodeId::try_from(self.target_node_id)
    }

    pub fn to_bytes(&self) -> [u8; CONTROL_WIRE_SIZE] {
        let mut out = [0u8; CONTROL_WIRE_SIZE];
        self.put_fields(&mut &mut out[..]);
        out
    }

    pub fn from_bytes(bytes: &[u8; CONTROL_WIRE_SIZE]) -> Self {
        Self::get_fields(&mut &bytes[..])
    }
}

impl WirePacket for ControlPacket {
    const WIRE_SIZE: usize = CONTROL_WIRE_SIZE;
    const KIND: &'static str = "control";

    fn version_byte(&self) -> u8 {
        self.protocol_version
    }

    fn put_fields<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.protocol_version);
        buf.put_u8(self.target_node_id);
        buf.put_u16_le(self.command_flags.bits());
        buf.put_u16_le(self.duty_override);
        buf.put_u16_le(self.reserved);
    }

    fn get_fields<B: Buf>(buf: &mut B) -> Self {
        Self {
            protocol_version: buf.get_u8(),
            target_node_id: buf.get_u8(),
            command_flags: ControlFlags::from_bits(buf.get_u16_le()),
            duty_override: buf.get_u16_le(),
            reserved: buf.get_u16_le(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flags::{ControlFlag, TelemetryFlag};

    #[test]
    fn test_telemetry_field_offsets() {
        let packet = TelemetryPacket {
            protocol_version: 0x01,
            node_id: 0x02,
            flags: TelemetryFlags::from_bits(0x0304),
            primary_value: -2,
            secondary_value: 0x0506,
            potentiometer_raw: 0x0708,
            duty_commanded: 0x090A,
            reserved: 0x0B0C,
        };
        assert_eq!(
            packet.to_bytes(),
            [0x01, 0x02, 0x04, 0x03, 0xFE, 0xFF, 0x06, 0x05, 0x08, 0x07, 0x0A, 0x09, 0x0C, 0x0B]
        );
    }

    #[test]
    fn test_event_field_offsets() {
        let packet = EventPacket {
            protocol_version: 1,
            node_id: 2,
            event_type: 4,
            event_value: i16::MIN,
            timestamp_ms_mod: 0xABCD,
        };
        assert_eq!(packet.to_bytes(), [0x01, 0x02, 0x04, 0x00, 0x80, 0xCD, 0xAB]);
    }

    #[test]
    fn test_control_field_offsets() {
        let packet = ControlPacket {
            protocol_version: 1,
            target_node_id: 1,
            command_flags: ControlFlags::from_bits(0x8003),
            duty_override: 1000,
            reserved: 0,
        };
        let bytes = packet.to_bytes();
        assert_eq!(bytes, [0x01, 0x01, 0x03, 0x80, 0xE8, 0x03, 0x00, 0x00]);
        assert_eq!(ControlPacket::from_bytes(&bytes), packet);
    }

    #[test]
    fn test_typed_accessors() {
        let packet = TelemetryPacket::from_bytes(&[1, 2, 1, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(packet.node().ok(), Some(NodeId::SensorNode2));
        assert_eq!(packet.version().ok(), Some(ProtocolVersion::V1));
        assert!(packet.flags.contains(TelemetryFlag::HelpActive));
        assert!(packet.secondary_bit());

        let event = EventPacket::from_bytes(&[1, 9, 7, 0, 0, 0, 0]);
        assert!(event.node().is_err());
        assert!(event.kind().is_err());

        let control = ControlPacket::from_bytes(&[3, 0, 2, 0, 0, 0, 0, 0]);
        assert!(control.version().is_err());
        assert_eq!(control.target().ok(), Some(NodeId::Control));
        assert!(control.command_flags.contains(ControlFlag::ClearHelpRequest));
    }

    #[test]
    fn test_wire_size_constants() {
        assert_eq!(<TelemetryPacket as WirePacket>::WIRE_SIZE, 14);
        assert_eq!(<EventPacket as WirePacket>::WIRE_SIZE, 7);
        assert_eq!(<ControlPacket as WirePacket>::WIRE_SIZE, 8);
    }
}

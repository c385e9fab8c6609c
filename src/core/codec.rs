//! # Codec Operations
//!
//! Builders, the version gate, and pack/unpack routines for every packet type.
//!
//! All functions are pure: they read their arguments, write only into a
//! caller-supplied buffer (or a buffer they allocate and return), and keep no
//! state between calls. They are safe to call from any number of threads.
//!
//! ## Validation order
//! - **Pack**: destination length first, then the packet's version field.
//! - **Unpack**: version byte first, then source length. A truncated buffer
//!   whose first byte is also a wrong version reports the version failure.
//!
//! ## Usage
//! ```rust
//! use sensor_link_protocol::core::codec::{make_control, pack_control, unpack_control};
//! use sensor_link_protocol::core::flags::{ControlFlag, ControlFlags};
//! use sensor_link_protocol::core::packet::CONTROL_WIRE_SIZE;
//! use sensor_link_protocol::core::registry::NodeId;
//!
//! let packet = make_control(NodeId::SensorNode2, ControlFlag::OverrideEnable.into(), 750);
//! let mut buf = [0u8; CONTROL_WIRE_SIZE];
//! pack_control(&packet, &mut buf).unwrap();
//! assert_eq!(unpack_control(&buf).unwrap(), packet);
//! ```

use crate::core::flags::{ControlFlags, TelemetryFlags};
use crate::core::packet::{ControlPacket, EventPacket, TelemetryPacket, WirePacket};
use crate::core::registry::{EventType, NodeId, ProtocolVersion, DUTY_PER_MILLE_MAX};
use crate::error::constants::{ERR_EMPTY_BUFFER, ERR_SHORT_BUFFER, ERR_UNSUPPORTED_VERSION};
use crate::error::{ProtocolError, Result};
use bytes::{Bytes, BytesMut};
use tracing::debug;

/// Saturate a duty request to `0..=1000` per-mille.
#[inline]
pub fn clamp_duty(duty_per_mille: u16) -> u16 {
    duty_per_mille.min(DUTY_PER_MILLE_MAX)
}

/// Telemetry packet for `node` with every value zeroed.
pub fn make_telemetry(node: NodeId) -> TelemetryPacket {
    TelemetryPacket {
        protocol_version: ProtocolVersion::CURRENT.as_u8(),
        node_id: node.as_u8(),
        flags: TelemetryFlags::EMPTY,
        primary_value: 0,
        secondary_value: 0,
        potentiometer_raw: 0,
        duty_commanded: 0,
        reserved: 0,
    }
}

pub fn make_event(
    node: NodeId,
    kind: EventType,
    value: i16,
    timestamp_ms_mod: u16,
) -> EventPacket {
    EventPacket {
        protocol_version: ProtocolVersion::CURRENT.as_u8(),
        node_id: node.as_u8(),
        event_type: kind.as_u8(),
        event_value: value,
        timestamp_ms_mod,
    }
}

/// Control packet addressed to `target`. `duty_override` is clamped to 1000.
pub fn make_control(target: NodeId, flags: ControlFlags, duty_override: u16) -> ControlPacket {
    ControlPacket {
        protocol_version: ProtocolVersion::CURRENT.as_u8(),
        target_node_id: target.as_u8(),
        command_flags: flags,
        duty_override: clamp_duty(duty_override),
        reserved: 0,
    }
}

/// True iff `buffer` is non-empty and its first byte equals `expected`.
#[inline]
pub fn validate_version(expected: ProtocolVersion, buffer: &[u8]) -> bool {
    buffer.first() == Some(&expected.as_u8())
}

/// Same verdict as [`validate_version`], with the reason on failure.
pub fn check_version(expected: ProtocolVersion, buffer: &[u8]) -> Result<()> {
    match buffer.first() {
        None => {
            debug!("{ERR_EMPTY_BUFFER}");
            Err(ProtocolError::BufferTooShort {
                needed: 1,
                actual: 0,
            })
        }
        Some(&byte) if byte != expected.as_u8() => {
            debug!(version = byte, expected = expected.as_u8(), "{ERR_UNSUPPORTED_VERSION}");
            Err(ProtocolError::UnsupportedVersion(byte))
        }
        Some(_) => Ok(()),
    }
}

/// Serialise `packet` into the front of `dst`, returning the number of bytes written.
///
/// # Errors
/// - [`ProtocolError::BufferTooShort`] if `dst` is smaller than `P::WIRE_SIZE`
/// - [`ProtocolError::UnsupportedVersion`] if the packet's version is not current
pub fn pack<P: WirePacket>(packet: &P, dst: &mut [u8]) -> Result<usize> {
    if dst.len() < P::WIRE_SIZE {
        debug!(
            kind = P::KIND,
            needed = P::WIRE_SIZE,
            actual = dst.len(),
            "{ERR_SHORT_BUFFER}"
        );
        return Err(ProtocolError::BufferTooShort {
            needed: P::WIRE_SIZE,
            actual: dst.len(),
        });
    }

    let version = packet.version_byte();
    if version != ProtocolVersion::CURRENT.as_u8() {
        debug!(kind = P::KIND, version, "{ERR_UNSUPPORTED_VERSION}");
        return Err(ProtocolError::UnsupportedVersion(version));
    }

    let mut cursor = &mut dst[..P::WIRE_SIZE];
    packet.put_fields(&mut cursor);
    Ok(P::WIRE_SIZE)
}

/// Deserialise a packet from the front of `src`. Trailing bytes are ignored.
///
/// # Errors
/// - [`ProtocolError::BufferTooShort`] if `src` is empty, or shorter than
///   `P::WIRE_SIZE` after the version byte has been accepted
/// - [`ProtocolError::UnsupportedVersion`] if the first byte is not the current version
pub fn unpack<P: WirePacket>(src: &[u8]) -> Result<P> {
    check_version(ProtocolVersion::CURRENT, src)?;

    if src.len() < P::WIRE_SIZE {
        debug!(
            kind = P::KIND,
            needed = P::WIRE_SIZE,
            actual = src.len(),
            "{ERR_SHORT_BUFFER}"
        );
        return Err(ProtocolError::BufferTooShort {
            needed: P::WIRE_SIZE,
            actual: src.len(),
        });
    }

    let mut cursor = &src[..P::WIRE_SIZE];
    Ok(P::get_fields(&mut cursor))
}

/// Serialise `packet` into a freshly allocated, exactly sized buffer.
pub fn encode<P: WirePacket>(packet: &P) -> Result<Bytes> {
    let mut buf = BytesMut::zeroed(P::WIRE_SIZE);
    pack(packet, &mut buf)?;
    Ok(buf.freeze())
}

pub fn pack_telemetry(packet: &TelemetryPacket, dst: &mut [u8]) -> Result<usize> {
    pack(packet, dst)
}

pub fn pack_event(packet: &EventPacket, dst: &mut [u8]) -> Result<usize> {
    pack(packet, dst)
}

pub fn pack_control(packet: &ControlPacket, dst: &mut [u8]) -> Result<usize> {
    pack(packet, dst)
}

pub fn unpack_telemetry(src: &[u8]) -> Result<TelemetryPacket> {
    unpack(src)
}

pub fn unpack_event(src: &[u8]) -> Result<EventPacket> {
    unpack(src)
}

pub fn unpack_control(src: &[u8]) -> Result<ControlPacket> {
    unpack(src)
}

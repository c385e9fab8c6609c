//! Reference byte vectors for cross-implementation conformance checks.
//!
//! Each endpoint implementation, in any language, must produce exactly these
//! bytes for the described packet.

use crate::core::packet::{CONTROL_WIRE_SIZE, EVENT_WIRE_SIZE, TELEMETRY_WIRE_SIZE};

/// SN2 telemetry: help active, 22.50 °C, sound detected, pot 2048, duty 50%.
pub const TELEMETRY_VECTOR: [u8; TELEMETRY_WIRE_SIZE] = [
    0x01, 0x02, // version, node
    0x01, 0x00, // flags
    0xCA, 0x08, // primary = 2250
    0x01, 0x00, // secondary
    0x00, 0x08, // pot raw = 2048
    0xF4, 0x01, // duty = 500
    0x00, 0x00, // reserved
];

/// SN1 motion detected, value 1, timestamp 0x1234.
pub const EVENT_VECTOR: [u8; EVENT_WIRE_SIZE] = [0x01, 0x01, 0x02, 0x01, 0x00, 0x34, 0x12];

/// Control node enables override on SN2 at 75% duty.
pub const CONTROL_VECTOR: [u8; CONTROL_WIRE_SIZE] = [0x01, 0x02, 0x01, 0x00, 0xEE, 0x02, 0x00, 0x00];

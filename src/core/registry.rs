//! # Identifier & Constant Registry
//!
//! Fixed identifiers and constants shared by every endpoint on the link.
//!
//! Nothing in here is computed at runtime: the UUID strings are handed verbatim
//! to the transport binding, and the enumerations map one-to-one onto the raw
//! bytes carried in packet headers.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GATT service and characteristic UUIDs.
///
/// Treated as opaque strings; the codec never parses them.
pub mod uuid {
    pub const SERVICE: &str = "8f9d2a10-6a7b-4c7e-9f7b-2c6a0e1d8a40";
    pub const TELEMETRY: &str = "8f9d2a11-6a7b-4c7e-9f7b-2c6a0e1d8a40";
    pub const EVENT: &str = "8f9d2a12-6a7b-4c7e-9f7b-2c6a0e1d8a40";
    pub const CONTROL: &str = "8f9d2a13-6a7b-4c7e-9f7b-2c6a0e1d8a40";
}

/// Temperature scaling: centi-degrees Celsius per degree.
pub const TEMPERATURE_CENTI_PER_C: i32 = 100;

/// Illuminance scaling: deci-lux per lux.
pub const LUX_DECI_PER_LUX: i32 = 10;

/// Duty cycle ceiling in per-mille (1000 = 100%).
pub const DUTY_PER_MILLE_MAX: u16 = 1000;

/// Period between telemetry notifications. Consumed by the application, not the codec.
pub const TELEMETRY_PERIOD_MS: u32 = 1000;

/// Minimum spacing between repeated events of the same kind. Consumed by the application.
pub const EVENT_LOCKOUT_MS: u32 = 5000;

/// Wire protocol version carried in the first byte of every packet.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    V1 = 1,
}

impl ProtocolVersion {
    /// The only version this crate encodes or accepts.
    pub const CURRENT: Self = ProtocolVersion::V1;

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ProtocolVersion {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(ProtocolVersion::V1),
            other => Err(ProtocolError::UnsupportedVersion(other)),
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// Logical endpoint identity on the link.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum NodeId {
    #[default]
    #[serde(rename = "control")]
    Control = 0,
    /// Light and motion sensor node.
    #[serde(rename = "sn1")]
    SensorNode1 = 1,
    /// Temperature and sound sensor node.
    #[serde(rename = "sn2")]
    SensorNode2 = 2,
}

impl NodeId {
    pub const ALL: [NodeId; 3] = [NodeId::Control, NodeId::SensorNode1, NodeId::SensorNode2];

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short name used in configuration and logs
    pub fn name(self) -> &'static str {
        match self {
            NodeId::Control => "control",
            NodeId::SensorNode1 => "sn1",
            NodeId::SensorNode2 => "sn2",
        }
    }

    pub fn is_sensor(self) -> bool {
        !matches!(self, NodeId::Control)
    }
}

impl TryFrom<u8> for NodeId {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(NodeId::Control),
            1 => Ok(NodeId::SensorNode1),
            2 => Ok(NodeId::SensorNode2),
            other => Err(ProtocolError::UnknownNodeId(other)),
        }
    }
}

impl FromStr for NodeId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<u8>() {
            return NodeId::try_from(raw);
        }
        NodeId::ALL
            .into_iter()
            .find(|node| node.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ProtocolError::ConfigError(format!("Unknown node name: '{trimmed}'")))
    }
}

impl TryFrom<String> for NodeId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Edge-triggered event kinds reported by sensor nodes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    HelpToggled = 1,
    MotionDetected = 2,
    SoundDetected = 3,
    SensorFault = 4,
}

impl EventType {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            EventType::HelpToggled => "help_toggled",
            EventType::MotionDetected => "motion_detected",
            EventType::SoundDetected => "sound_detected",
            EventType::SensorFault => "sensor_fault",
        }
    }
}

impl TryFrom<u8> for EventType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(EventType::HelpToggled),
            2 => Ok(EventType::MotionDetected),
            3 => Ok(EventType::SoundDetected),
            4 => Ok(EventType::SensorFault),
            other => Err(ProtocolError::UnknownEventType(other)),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which way a channel's payload travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Notified by a sensor node, read by the control node
    SensorToControl,
    /// Written by the control node into a sensor node
    ControlToSensor,
}

/// The three characteristics exposed under the service UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Telemetry,
    Event,
    Control,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Telemetry, Channel::Event, Channel::Control];

    pub fn uuid(self) -> &'static str {
        match self {
            Channel::Telemetry => uuid::TELEMETRY,
            Channel::Event => uuid::EVENT,
            Channel::Control => uuid::CONTROL,
        }
    }

    /// Fixed payload size of the packet carried on this channel
    pub fn wire_size(self) -> usize {
        use crate::core::packet::{CONTROL_WIRE_SIZE, EVENT_WIRE_SIZE, TELEMETRY_WIRE_SIZE};
        match self {
            Channel::Telemetry => TELEMETRY_WIRE_SIZE,
            Channel::Event => EVENT_WIRE_SIZE,
            Channel::Control => CONTROL_WIRE_SIZE,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Channel::Telemetry | Channel::Event => Direction::SensorToControl,
            Channel::Control => Direction::ControlToSensor,
        }
    }

    /// Look up a channel by its characteristic UUID (case-insensitive).
    pub fn from_uuid(value: &str) -> Option<Self> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.uuid().eq_ignore_ascii_case(value))
    }
}

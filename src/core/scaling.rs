//! # Fixed-Point Scaling
//!
//! Conversions between physical quantities and the scaled integers carried on
//! the wire, plus node-specific interpretation of telemetry values.
//!
//! Floating point never reaches the wire. These helpers exist for the
//! application on either side of the link.

use crate::core::packet::TelemetryPacket;
use crate::core::registry::{NodeId, LUX_DECI_PER_LUX, TEMPERATURE_CENTI_PER_C};
use crate::error::{ProtocolError, Result};

// Float-to-int `as` casts saturate and map NaN to 0.
#[inline]
fn scale_to_i16(value: f32, factor: i32) -> i16 {
    (value * factor as f32).round() as i16
}

/// Degrees Celsius to centi-degrees, rounded and saturated.
pub fn celsius_to_centi(celsius: f32) -> i16 {
    scale_to_i16(celsius, TEMPERATURE_CENTI_PER_C)
}

pub fn centi_to_celsius(centi: i16) -> f32 {
    f32::from(centi) / TEMPERATURE_CENTI_PER_C as f32
}

/// Lux to deci-lux, rounded and saturated.
pub fn lux_to_deci(lux: f32) -> i16 {
    scale_to_i16(lux, LUX_DECI_PER_LUX)
}

pub fn deci_to_lux(deci: i16) -> f32 {
    f32::from(deci) / LUX_DECI_PER_LUX as f32
}

/// Milliseconds reduced modulo 65536 for the event timestamp field.
#[inline]
pub fn timestamp_mod(ms: u64) -> u16 {
    (ms & 0xFFFF) as u16
}

/// Milliseconds from `earlier` to `later`, correct across one wrap of the counter.
#[inline]
pub fn timestamp_elapsed(earlier: u16, later: u16) -> u16 {
    later.wrapping_sub(earlier)
}

/// Measurement carried in the primary/secondary telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReading {
    /// Sensor node 1: illuminance and motion
    Light { lux_deci: i16, motion: bool },
    /// Sensor node 2: temperature and sound
    Climate { temp_centi: i16, sound: bool },
}

impl SensorReading {
    /// Interpret `packet` according to its originating node.
    ///
    /// # Errors
    /// - [`ProtocolError::UnknownNodeId`] for an unassigned node id
    /// - [`ProtocolError::NotSensorNode`] if the packet claims to come from the control node
    pub fn from_telemetry(packet: &TelemetryPacket) -> Result<Self> {
        match packet.node()? {
            NodeId::SensorNode1 => Ok(SensorReading::Light {
                lux_deci: packet.primary_value,
                motion: packet.secondary_bit(),
            }),
            NodeId::SensorNode2 => Ok(SensorReading::Climate {
                temp_centi: packet.primary_value,
                sound: packet.secondary_bit(),
            }),
            NodeId::Control => Err(ProtocolError::NotSensorNode(packet.node_id)),
        }
    }

    /// Node expected to report this kind of reading
    pub fn node(&self) -> NodeId {
        match self {
            SensorReading::Light { .. } => NodeId::SensorNode1,
            SensorReading::Climate { .. } => NodeId::SensorNode2,
        }
    }

    /// Write the primary value and secondary bit 0; other secondary bits are kept.
    pub fn apply(&self, packet: &mut TelemetryPacket) {
        let (primary, bit) = match *self {
            SensorReading::Light { lux_deci, motion } => (lux_deci, motion),
            SensorReading::Climate { temp_centi, sound } => (temp_centi, sound),
        };
        packet.primary_value = primary;
        packet.secondary_value = (packet.secondary_value & !1) | i16::from(bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::make_telemetry;

    #[test]
    fn test_temperature_scaling() {
        assert_eq!(celsius_to_centi(22.5), 2250);
        assert_eq!(celsius_to_centi(-10.004), -1000);
        assert_eq!(celsius_to_centi(1000.0), i16::MAX);
        assert_eq!(celsius_to_centi(f32::NAN), 0);
        assert!((centi_to_celsius(2250) - 22.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lux_scaling() {
        assert_eq!(lux_to_deci(123.46), 1235);
        assert_eq!(lux_to_deci(-1.0e9), i16::MIN);
        assert!((deci_to_lux(1235) - 123.5).abs() < 1e-4);
    }

    #[test]
    fn test_timestamp_wraps() {
        assert_eq!(timestamp_mod(0x1234), 0x1234);
        assert_eq!(timestamp_mod(0x1_0000), 0);
        assert_eq!(timestamp_mod(0xFFFF_1234), 0x1234);
        assert_eq!(timestamp_elapsed(0xFFF0, 0x0010), 0x20);
        assert_eq!(timestamp_elapsed(100, 5100), 5000);
    }

    #[test]
    fn test_reading_by_node() {
        let mut packet = make_telemetry(NodeId::SensorNode2);
        packet.primary_value = 2250;
        packet.secondary_value = 1;
        assert_eq!(
            SensorReading::from_telemetry(&packet).ok(),
            Some(SensorReading::Climate {
                temp_centi: 2250,
                sound: true
            })
        );

        let light = make_telemetry(NodeId::SensorNode1);
        assert!(matches!(
            SensorReading::from_telemetry(&light),
            Ok(SensorReading::Light { motion: false, .. })
        ));

        let control = make_telemetry(NodeId::Control);
        assert!(matches!(
            SensorReading::from_telemetry(&control),
            Err(ProtocolError::NotSensorNode(0))
        ));

        let mut unknown = make_telemetry(NodeId::SensorNode1);
        unknown.node_id = 42;
        assert!(matches!(
            SensorReading::from_telemetry(&unknown),
            Err(ProtocolError::UnknownNodeId(42))
        ));
    }

    #[test]
    fn test_apply_preserves_upper_secondary_bits() {
        let mut packet = make_telemetry(NodeId::SensorNode1);
        packet.secondary_value = 0x0F01;
        let reading = SensorReading::Light {
            lux_deci: 4500,
            motion: false,
        };
        reading.apply(&mut packet);
        assert_eq!(packet.primary_value, 4500);
        assert_eq!(packet.secondary_value, 0x0F00);
        assert_eq!(reading.node(), NodeId::SensorNode1);
        assert_eq!(SensorReading::from_telemetry(&packet).ok(), Some(reading));
    }
}

//! Byte-exact conformance tests against the reference vectors.
//!
//! These are the bytes every endpoint implementation must agree on.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use sensor_link_protocol::core::packet::{CONTROL_WIRE_SIZE, EVENT_WIRE_SIZE, TELEMETRY_WIRE_SIZE};
use sensor_link_protocol::core::scaling::{celsius_to_centi, SensorReading};
use sensor_link_protocol::core::vectors::{CONTROL_VECTOR, EVENT_VECTOR, TELEMETRY_VECTOR};
use sensor_link_protocol::{
    make_control, make_event, make_telemetry, pack_control, pack_event, pack_telemetry,
    unpack_control, unpack_event, unpack_telemetry, ControlFlag, EventType, NodeId,
    TelemetryFlag,
};

#[test]
fn test_telemetry_vector() {
    let mut packet = make_telemetry(NodeId::SensorNode2);
    packet.flags.set(TelemetryFlag::HelpActive, true);
    packet.primary_value = celsius_to_centi(22.5);
    packet.secondary_value = 1;
    packet.potentiometer_raw = 2048;
    packet.duty_commanded = 500;

    let mut buf = [0u8; TELEMETRY_WIRE_SIZE];
    let written = pack_telemetry(&packet, &mut buf).expect("pack telemetry");

    assert_eq!(written, TELEMETRY_WIRE_SIZE);
    assert_eq!(
        buf,
        [0x01, 0x02, 0x01, 0x00, 0xCA, 0x08, 0x01, 0x00, 0x00, 0x08, 0xF4, 0x01, 0x00, 0x00]
    );
    assert_eq!(buf, TELEMETRY_VECTOR);
}

#[test]
fn test_telemetry_vector_decodes() {
    let packet = unpack_telemetry(&TELEMETRY_VECTOR).expect("unpack telemetry");

    assert_eq!(packet.node().unwrap(), NodeId::SensorNode2);
    assert!(packet.flags.contains(TelemetryFlag::HelpActive));
    assert!(!packet.flags.contains(TelemetryFlag::OverrideActive));
    assert_eq!(packet.potentiometer_raw, 2048);
    assert_eq!(packet.duty_commanded, 500);
    assert_eq!(
        SensorReading::from_telemetry(&packet).unwrap(),
        SensorReading::Climate {
            temp_centi: 2250,
            sound: true
        }
    );
}

#[test]
fn test_event_vector() {
    let packet = make_event(NodeId::SensorNode1, EventType::MotionDetected, 1, 0x1234);

    let mut buf = [0u8; EVENT_WIRE_SIZE];
    pack_event(&packet, &mut buf).expect("pack event");

    assert_eq!(buf, [0x01, 0x01, 0x02, 0x01, 0x00, 0x34, 0x12]);
    assert_eq!(buf, EVENT_VECTOR);

    let decoded = unpack_event(&buf).expect("unpack event");
    assert_eq!(decoded, packet);
    assert_eq!(decoded.kind().unwrap(), EventType::MotionDetected);
}

#[test]
fn test_control_vector() {
    let packet = make_control(NodeId::SensorNode2, ControlFlag::OverrideEnable.into(), 750);

    let mut buf = [0u8; CONTROL_WIRE_SIZE];
    pack_control(&packet, &mut buf).expect("pack control");
    assert_eq!(buf, [0x01, 0x02, 0x01, 0x00, 0xEE, 0x02, 0x00, 0x00]);
    assert_eq!(buf, CONTROL_VECTOR);
}

#[test]
fn test_control_vector_decodes() {
    let packet = unpack_control(&CONTROL_VECTOR).expect("unpack control");

    assert_eq!(packet.duty_override, 750);
    assert!(packet.command_flags.contains(ControlFlag::OverrideEnable));
    assert_eq!(packet.command_flags.bits() & 1, 1);
    assert!(!packet.command_flags.contains(ControlFlag::ClearHelpRequest));
    assert_eq!(packet.target().unwrap(), NodeId::SensorNode2);
    assert_eq!(packet.reserved, 0);
}

#[test]
fn test_packets_serialize_to_json() {
    let packet = unpack_control(&CONTROL_VECTOR).expect("unpack control");
    let json = serde_json::to_value(packet).expect("serialize");

    assert_eq!(json["target_node_id"], 2);
    assert_eq!(json["command_flags"], 1);
    assert_eq!(json["duty_override"], 750);

    let back: sensor_link_protocol::ControlPacket =
        serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, packet);
}

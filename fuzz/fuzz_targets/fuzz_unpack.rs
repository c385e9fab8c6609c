#![no_main]

use libfuzzer_sys::fuzz_target;
use sensor_link_protocol::core::codec::{
    encode, unpack_control, unpack_event, unpack_telemetry, validate_version,
};
use sensor_link_protocol::ProtocolVersion;

fuzz_target!(|data: &[u8]| {
    // Unpack must never panic, and anything accepted must re-encode to the same prefix
    let accepted = validate_version(ProtocolVersion::CURRENT, data);

    if let Ok(packet) = unpack_telemetry(data) {
        assert!(accepted);
        let bytes = encode(&packet).expect("accepted packet re-encodes");
        assert_eq!(&bytes[..], &data[..bytes.len()]);
    }

    if let Ok(packet) = unpack_event(data) {
        assert!(accepted);
        let bytes = encode(&packet).expect("accepted packet re-encodes");
        assert_eq!(&bytes[..], &data[..bytes.len()]);
    }

    if let Ok(packet) = unpack_control(data) {
        assert!(accepted);
        let bytes = encode(&packet).expect("accepted packet re-encodes");
        assert_eq!(&bytes[..], &data[..bytes.len()]);
    }
});

//! # Error Types
//!
//! Error handling for the sensor link protocol.
//!
//! The codec itself only ever fails for two reasons: a buffer that is too short
//! for the fixed wire size of a packet, or a protocol version byte that does not
//! match the single supported version. The remaining variants cover typed
//! interpretation of raw wire fields and the configuration surface used by the
//! surrounding application.
//!
//! ## Error Categories
//! - **Buffer Errors**: destination or source shorter than the packet's wire size
//! - **Version Errors**: version byte differs from [`ProtocolVersion::CURRENT`]
//! - **Identity Errors**: node id or event type byte outside the known set
//! - **Configuration Errors**: unreadable or invalid configuration
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Example Usage
//! ```rust
//! use sensor_link_protocol::core::codec::unpack_control;
//! use sensor_link_protocol::error::ProtocolError;
//! use tracing::{info, warn};
//!
//! match unpack_control(&[0x02, 0x02, 0x01, 0x00]) {
//!     Ok(packet) => info!(duty = packet.duty_override, "Control packet accepted"),
//!     Err(ProtocolError::UnsupportedVersion(v)) => warn!(version = v, "Dropping packet"),
//!     Err(e) => warn!(error = %e, "Dropping packet"),
//! }
//! ```
//!
//! [`ProtocolVersion::CURRENT`]: crate::core::registry::ProtocolVersion::CURRENT

use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Buffer validation errors
    pub const ERR_EMPTY_BUFFER: &str = "Buffer is empty";
    pub const ERR_SHORT_BUFFER: &str = "Buffer shorter than packet wire size";

    /// Protocol negotiation errors
    pub const ERR_UNSUPPORTED_VERSION: &str = "Unsupported protocol version";
}

// ProtocolError is the primary error type for all protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown node id: {0}")]
    UnknownNodeId(u8),

    #[error("Unknown event type: {0}")]
    UnknownEventType(u8),

    #[error("Node {0} is not a sensor node")]
    NotSensorNode(u8),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

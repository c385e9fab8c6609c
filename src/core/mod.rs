//! # Core Protocol Components
//!
//! Identifiers, packet layouts, flag algebra and the codec that moves packets
//! to and from raw byte buffers.
//!
//! ## Components
//! - **Registry**: UUIDs, protocol version, node ids, event types, constants
//! - **Packet**: the three fixed-size wire records
//! - **Flags**: bit-mask helpers for telemetry and control flag fields
//! - **Codec**: builders, version validation, pack/unpack
//! - **Scaling**: fixed-point conversions and telemetry interpretation
//! - **Vectors**: reference bytes for conformance testing
//!
//! ## Wire Format
//! ```text
//! [Version(1)] [NodeId(1)] [type-specific fields, little-endian]
//! ```
//!
//! ## Guarantees
//! - Every packet has a fixed size, checked at compile time
//! - Version byte is always first and must match exactly
//! - Buffers are length-checked before any byte is read or written

pub mod codec;
pub mod flags;
pub mod packet;
pub mod registry;
pub mod scaling;
pub mod vectors;

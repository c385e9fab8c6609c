//! # Utility Modules
//!
//! Supporting utilities for the endpoint application.
//!
//! ## Components
//! - **Logging**: `tracing` subscriber setup driven by [`LoggingConfig`]
//!
//! [`LoggingConfig`]: crate::config::LoggingConfig

pub mod logging;

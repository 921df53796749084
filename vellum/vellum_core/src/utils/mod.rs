//! Utility types for Vellum.
//!
//! This module provides log level handling and the startup configuration
//! consumed by the authorization layer.

pub mod config;
pub mod logging;

pub use config::AuthorizationConfig;
pub use logging::LogLevel;

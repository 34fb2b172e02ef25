//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// TTL (`Duration` as whole seconds) serialization helpers.
pub mod ttl;

//! Data models
//!
//! Shared between admin-server and the admin frontend (via API).
//! All IDs are `i64`; timestamps are unix milliseconds.

pub mod employee;

// Re-exports
pub use employee::*;

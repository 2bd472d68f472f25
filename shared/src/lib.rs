//! Shared types for the admin backend
//!
//! Common types used by the server and its clients: error codes,
//! the unified response envelope, auth DTOs and employee models.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::PageResult;

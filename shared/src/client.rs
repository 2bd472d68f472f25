//! Client-related types shared between server and client
//!
//! Request/response bodies of the admin login API.

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export ApiResponse so clients only need this module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
///
/// Both fields must be non-empty; everything else (existence, password,
/// account status) is decided by the authenticator.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Login response data
///
/// Returned exactly once per successful login and never stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginResponse {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub token: String,
}

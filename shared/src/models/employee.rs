//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placeholder returned instead of the password hash
pub const MASKED_PASSWORD: &str = "****";

/// Employee account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum EmployeeStatus {
    /// Account may not log in
    Disabled = 0,
    /// Account may log in
    Enabled = 1,
}

impl From<EmployeeStatus> for u8 {
    fn from(status: EmployeeStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for EmployeeStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            other => Err(format!("invalid employee status: {}", other)),
        }
    }
}

/// Employee response (password masked)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    /// Always [`MASKED_PASSWORD`]
    pub password: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
    pub status: EmployeeStatus,
    /// Unix millis
    pub create_time: i64,
    /// Unix millis
    pub update_time: i64,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

/// Create employee payload
///
/// The new account always starts enabled with the default password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(equal = 11), custom(function = "validate_digits"))]
    pub phone: String,
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,
    #[validate(length(equal = 18))]
    pub id_number: String,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub id: i64,
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(equal = 11), custom(function = "validate_digits"))]
    pub phone: String,
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,
    #[validate(length(equal = 18))]
    pub id_number: String,
}

/// Paged query parameters (`?name=&page=&pageSize=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePageQuery {
    /// Substring filter on display name
    #[serde(default)]
    pub name: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Enable/disable query parameter (`?id=`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmployeeIdQuery {
    pub id: i64,
}

fn validate_digits(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("digits"))
    }
}

fn validate_sex(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "0" | "1" => Ok(()),
        _ => Err(validator::ValidationError::new("sex")),
    }
}

//! Repository Module
//!
//! In-process storage for admin records. Each repository owns its table
//! behind a shared lock so clones of the repository see the same data.

pub mod employee;

// Re-exports
pub use employee::EmployeeRepository;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::EmployeeNotFound, msg),
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::EmployeeUsernameExists, msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::NotFound("Employee 7 not found".into()).into();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee 7 not found");

        let err: AppError = RepoError::Duplicate("bob already exists".into()).into();
        assert_eq!(err.code, ErrorCode::EmployeeUsernameExists);
    }
}

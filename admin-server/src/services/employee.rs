//! Employee Service
//!
//! Account management for the admin console, plus the credential check used
//! by [`LoginService`](crate::auth::LoginService).

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{
    EmployeeCreate, EmployeePageQuery, EmployeeResponse, EmployeeStatus, EmployeeUpdate,
};
use shared::{AppError, AppResult, ErrorCode, PageResult};
use validator::Validate;

use crate::auth::password::{DEFAULT_PASSWORD, hash_password, verify_password};
use crate::auth::{Authenticator, Principal};
use crate::db::models::NewEmployee;
use crate::db::repository::EmployeeRepository;
use crate::db::repository::employee::EmployeeProfile;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &EmployeeRepository {
        &self.repo
    }

    /// Create the bootstrap administrator if no account exists yet
    ///
    /// Returns the id of the new account, or `None` when the store was
    /// already populated.
    pub fn seed_admin(&self, username: &str, password: &str) -> AppResult<Option<i64>> {
        if self.repo.count() > 0 {
            return Ok(None);
        }

        let hash = hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        let employee = self.repo.create(NewEmployee {
            username: username.to_string(),
            name: "管理员".to_string(),
            password: hash,
            phone: "13812345678".to_string(),
            sex: "1".to_string(),
            id_number: "110101199001010047".to_string(),
            status: EmployeeStatus::Enabled,
            create_time: Utc::now().timestamp_millis(),
            create_user: None,
        })?;

        tracing::info!(emp_id = employee.id, username = %employee.username, "Seeded admin account");
        Ok(Some(employee.id))
    }

    /// Create a new employee with the default password, enabled
    pub fn save(&self, operator: i64, payload: EmployeeCreate) -> AppResult<EmployeeResponse> {
        payload.validate()?;

        let hash = hash_password(DEFAULT_PASSWORD)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        let employee = self.repo.create(NewEmployee {
            username: payload.username,
            name: payload.name,
            password: hash,
            phone: payload.phone,
            sex: payload.sex,
            id_number: payload.id_number,
            status: EmployeeStatus::Enabled,
            create_time: Utc::now().timestamp_millis(),
            create_user: Some(operator),
        })?;

        tracing::info!(
            emp_id = employee.id,
            username = %employee.username,
            operator,
            "Employee created"
        );
        Ok(employee.to_response())
    }

    /// Paged listing, newest first
    pub fn page(&self, query: &EmployeePageQuery) -> PageResult<EmployeeResponse> {
        let page = query.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let page_size = query
            .page_size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let name = query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let (total, rows) = self.repo.page(name, page, page_size);
        tracing::debug!(total, page, page_size, "Employee page query");
        PageResult::new(total, rows.iter().map(|e| e.to_response()).collect())
    }

    /// Enable (`1`) or disable (`0`) an account
    pub fn start_or_stop(&self, operator: i64, status: i32, id: i64) -> AppResult<()> {
        let status = u8::try_from(status)
            .ok()
            .and_then(|s| EmployeeStatus::try_from(s).ok())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::EmployeeStatusInvalid,
                    format!("Invalid employee status: {}", status),
                )
            })?;

        self.repo
            .set_status(id, status, Utc::now().timestamp_millis(), operator)?;
        tracing::info!(emp_id = id, status = u8::from(status), operator, "Employee status changed");
        Ok(())
    }

    /// Single employee with the password masked
    pub fn get_by_id(&self, id: i64) -> AppResult<EmployeeResponse> {
        self.repo
            .find_by_id(id)
            .map(|e| e.to_response())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::EmployeeNotFound,
                    format!("Employee {} not found", id),
                )
            })
    }

    /// Overwrite an employee's profile fields
    pub fn update(&self, operator: i64, payload: EmployeeUpdate) -> AppResult<EmployeeResponse> {
        payload.validate()?;

        let employee = self.repo.update_profile(
            payload.id,
            EmployeeProfile {
                username: payload.username,
                name: payload.name,
                phone: payload.phone,
                sex: payload.sex,
                id_number: payload.id_number,
            },
            Utc::now().timestamp_millis(),
            operator,
        )?;

        tracing::info!(emp_id = employee.id, operator, "Employee updated");
        Ok(employee.to_response())
    }
}

#[async_trait]
impl Authenticator for EmployeeService {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        let Some(employee) = self.repo.find_by_username(username) else {
            return Err(AppError::invalid_credentials());
        };

        let matches = verify_password(password, &employee.password).map_err(|e| {
            tracing::error!(emp_id = employee.id, error = %e, "Stored password hash is unreadable");
            AppError::internal("Password verification failed")
        })?;
        if !matches {
            return Err(AppError::invalid_credentials());
        }

        if !employee.is_enabled() {
            return Err(AppError::account_locked());
        }

        Ok(Principal {
            id: employee.id,
            username: employee.username,
            name: employee.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MASKED_PASSWORD;

    fn service() -> EmployeeService {
        let service = EmployeeService::new(EmployeeRepository::new());
        service.seed_admin("admin", "123456").unwrap();
        service
    }

    fn create(username: &str, name: &str) -> EmployeeCreate {
        EmployeeCreate {
            username: username.to_string(),
            name: name.to_string(),
            phone: "13800000000".to_string(),
            sex: "1".to_string(),
            id_number: "110101199001010011".to_string(),
        }
    }

    #[test]
    fn test_seed_admin_only_once() {
        let service = service();
        assert_eq!(service.seed_admin("admin", "123456").unwrap(), None);
        assert_eq!(service.repository().count(), 1);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();

        let principal = service.authenticate("admin", "123456").await.unwrap();
        assert_eq!(principal.id, 1);
        assert_eq!(principal.username, "admin");

        let wrong = service.authenticate("admin", "nope").await.unwrap_err();
        let unknown = service.authenticate("ghost", "123456").await.unwrap_err();
        assert_eq!(wrong.code, ErrorCode::InvalidCredentials);
        assert_eq!(unknown.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn test_disabled_account_cannot_authenticate() {
        let service = service();
        let bob = service.save(1, create("bob", "Bob")).unwrap();

        // new accounts get the default password
        assert!(service.authenticate("bob", DEFAULT_PASSWORD).await.is_ok());

        service.start_or_stop(1, 0, bob.id).unwrap();
        let err = service
            .authenticate("bob", DEFAULT_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountLocked);

        service.start_or_stop(1, 1, bob.id).unwrap();
        assert!(service.authenticate("bob", DEFAULT_PASSWORD).await.is_ok());
    }

    #[test]
    fn test_save() {
        let service = service();
        let bob = service.save(1, create("bob", "Bob")).unwrap();
        assert_eq!(bob.status, EmployeeStatus::Enabled);
        assert_eq!(bob.password, MASKED_PASSWORD);
        assert_eq!(bob.create_user, Some(1));
        assert_eq!(bob.update_user, Some(1));
        assert_eq!(bob.create_time, bob.update_time);

        let err = service.save(1, create("bob", "Bobby")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeUsernameExists);
        assert_eq!(err.message, "bob already exists");

        let err = service.save(1, create("", "Empty")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_page_defaults_and_cap() {
        let service = service();
        for i in 0..12 {
            service
                .save(1, create(&format!("user{}", i), &format!("张{}", i)))
                .unwrap();
        }

        let result = service.page(&EmployeePageQuery::default());
        assert_eq!(result.total, 13);
        assert_eq!(result.records.len(), DEFAULT_PAGE_SIZE as usize);

        let result = service.page(&EmployeePageQuery {
            name: Some("张".to_string()),
            page: Some(2),
            page_size: Some(10),
        });
        assert_eq!(result.total, 12);
        assert_eq!(result.records.len(), 2);

        let result = service.page(&EmployeePageQuery {
            name: Some("  ".to_string()),
            page: Some(0),
            page_size: Some(10_000),
        });
        assert_eq!(result.total, 13);
        assert_eq!(result.records.len(), 13);
    }

    #[test]
    fn test_page_size_capped() {
        let service = service();
        // insert through the repository to skip password hashing
        for i in 0..150 {
            service
                .repository()
                .create(NewEmployee {
                    username: format!("bulk{}", i),
                    name: format!("Bulk {}", i),
                    password: "hash".to_string(),
                    phone: "13800000000".to_string(),
                    sex: "1".to_string(),
                    id_number: "110101199001010011".to_string(),
                    status: EmployeeStatus::Enabled,
                    create_time: i,
                    create_user: Some(1),
                })
                .unwrap();
        }

        let result = service.page(&EmployeePageQuery {
            name: None,
            page: Some(1),
            page_size: Some(10_000),
        });
        assert_eq!(result.total, 151);
        assert_eq!(result.records.len(), MAX_PAGE_SIZE as usize);

        let result = service.page(&EmployeePageQuery {
            name: None,
            page: Some(2),
            page_size: Some(10_000),
        });
        assert_eq!(result.records.len(), 51);
    }

    #[test]
    fn test_start_or_stop_rejects_unknown_status() {
        let service = service();
        let err = service.start_or_stop(1, 2, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeStatusInvalid);
        let err = service.start_or_stop(1, -1, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeStatusInvalid);

        let err = service.start_or_stop(1, 0, 404).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[test]
    fn test_get_by_id_and_update() {
        let service = service();
        let bob = service.save(1, create("bob", "Bob")).unwrap();

        let fetched = service.get_by_id(bob.id).unwrap();
        assert_eq!(fetched, bob);
        assert_eq!(
            service.get_by_id(404).unwrap_err().code,
            ErrorCode::EmployeeNotFound
        );

        let updated = service
            .update(
                7,
                EmployeeUpdate {
                    id: bob.id,
                    username: "robert".to_string(),
                    name: "Robert".to_string(),
                    phone: "13900000000".to_string(),
                    sex: "0".to_string(),
                    id_number: "110101199001010022".to_string(),
                },
            )
            .unwrap();
        assert_eq!(updated.username, "robert");
        assert_eq!(updated.update_user, Some(7));
        assert_eq!(updated.create_user, Some(1));

        let err = service
            .update(
                7,
                EmployeeUpdate {
                    id: bob.id,
                    username: "admin".to_string(),
                    name: "Robert".to_string(),
                    phone: "13900000000".to_string(),
                    sex: "0".to_string(),
                    id_number: "110101199001010022".to_string(),
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeUsernameExists);
    }
}

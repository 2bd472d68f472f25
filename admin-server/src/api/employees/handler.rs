//! Employee API Handlers

use axum::{Json, extract::State};
use shared::PageResult;
use shared::client::{EmployeeLoginResponse, LoginRequest};
use shared::models::{
    EmployeeCreate, EmployeeIdQuery, EmployeePageQuery, EmployeeResponse, EmployeeUpdate,
};

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::CurrentEmployee;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_empty};

/// Log in and receive a token
pub async fn login(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<EmployeeLoginResponse>>> {
    let result = state.login.issue(&req).await.map_err(AppError::from)?;
    security_log!("INFO", "login_success", emp_id = result.id);
    Ok(ok(result))
}

/// Log out
///
/// Tokens are stateless; the client discards its copy and the token stays
/// valid until `exp`.
pub async fn logout(current: CurrentEmployee) -> Json<ApiResponse<()>> {
    security_log!("INFO", "logout", emp_id = current.id);
    ok_empty()
}

/// Create an employee
pub async fn save(
    State(state): State<ServerState>,
    current: CurrentEmployee,
    ApiJson(payload): ApiJson<EmployeeCreate>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    let employee = state.employees.save(current.id, payload)?;
    Ok(ok(employee))
}

/// Paged employee list
pub async fn page(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<EmployeePageQuery>,
) -> AppResult<Json<ApiResponse<PageResult<EmployeeResponse>>>> {
    Ok(ok(state.employees.page(&query)))
}

/// Enable or disable an account
pub async fn start_or_stop(
    State(state): State<ServerState>,
    current: CurrentEmployee,
    ApiPath(status): ApiPath<i32>,
    ApiQuery(query): ApiQuery<EmployeeIdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .employees
        .start_or_stop(current.id, status, query.id)?;
    Ok(ok_empty())
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    Ok(ok(state.employees.get_by_id(id)?))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentEmployee,
    ApiJson(payload): ApiJson<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    Ok(ok(state.employees.update(current.id, payload)?))
}

//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工登录与管理接口
//!
//! 所有 `/admin/` 路由 (登录除外) 由 [`require_auth`](crate::auth::require_auth) 保护。

pub mod employees;
pub mod extract;
pub mod health;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(employees::router())
}

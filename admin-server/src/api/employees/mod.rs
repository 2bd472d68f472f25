//! Employee API Module
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /admin/employee/login | POST | 登录并签发令牌 | 无 |
//! | /admin/employee/logout | POST | 退出登录 | 需要 |
//! | /admin/employee | POST | 新增员工 | 需要 |
//! | /admin/employee | PUT | 编辑员工信息 | 需要 |
//! | /admin/employee/page | GET | 分页查询 | 需要 |
//! | /admin/employee/status/{status} | POST | 启用/禁用账号 (`?id=`) | 需要 |
//! | /admin/employee/{id} | GET | 按 id 查询 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/admin/employee", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/", post(handler::save).put(handler::update))
        .route("/page", get(handler::page))
        .route("/status/{status}", post(handler::start_or_stop))
        .route("/{id}", get(handler::get_by_id))
}

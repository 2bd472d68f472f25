//! Admin Server - 管理端员工登录与账号管理
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT 签发/校验 + Argon2 密码
//! - **服务** (`services`): 员工管理与凭证校验
//! - **存储** (`db`): 进程内员工表
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT、登录、认证中间件
//! ├── services/      # 员工服务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、响应工具
//! └── db/            # 存储层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentEmployee, JwtService, LoginService};
pub use crate::core::{Config, Server, ServerState, build_router};
pub use services::EmployeeService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 按 `LOG_LEVEL` (默认 info)、`LOG_JSON` (默认 false)、`LOG_DIR` 初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
    ___       __          _
   /   | ____/ /___ ___  (_)___
  / /| |/ __  / __ `__ \/ / __ \
 / ___ / /_/ / / / / / / / / / /
/_/  |_\__,_/_/ /_/ /_/_/_/ /_/
    "#
    );
}

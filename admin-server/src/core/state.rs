use std::sync::Arc;

use crate::auth::{JwtService, LoginService};
use crate::core::{Config, Result, ServerError};
use crate::db::repository::EmployeeRepository;
use crate::services::EmployeeService;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一份。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | employees | Arc<EmployeeService> | 员工管理 / 凭证校验 |
/// | jwt_service | Arc<JwtService> | JWT 签发与校验 |
/// | login | LoginService | 登录并签发令牌 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 员工服务
    pub employees: Arc<EmployeeService>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 登录服务 (共享上面的员工服务与 JWT 服务)
    pub login: LoginService,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, employees: Arc<EmployeeService>, jwt_service: Arc<JwtService>) -> Self {
        let login = LoginService::new(employees.clone(), jwt_service.clone());
        Self {
            config,
            employees,
            jwt_service,
            login,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 校验配置
    /// 2. 创建员工存储并写入初始管理员
    /// 3. 创建 JWT 服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;

        let employees = Arc::new(EmployeeService::new(EmployeeRepository::new()));
        if let Some(id) = employees
            .seed_admin(&config.admin_username, &config.admin_password)
            .map_err(|e| ServerError::Init(e.to_string()))?
        {
            tracing::info!(emp_id = id, username = %config.admin_username, "Bootstrap admin created");
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        tracing::info!(
            ttl_seconds = config.jwt.admin_ttl_seconds,
            token_name = %config.jwt.admin_token_name,
            "JWT service ready"
        );

        Ok(Self::new(config.clone(), employees, jwt_service))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

use crate::auth::JwtConfig;
use crate::auth::password::DEFAULT_PASSWORD;
use crate::core::{Result, ServerError};
use crate::utils::env_setting;

/// 服务器配置 - 管理端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ADMIN_USERNAME | admin | 初始管理员账号 |
/// | ADMIN_PASSWORD | 123456 | 初始管理员密码 |
///
/// JWT 相关配置见 [`JwtConfig::from_env`]，日志配置见 [`setup_environment`](crate::setup_environment)。
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=9000 ADMIN_SECRET_KEY=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 初始管理员账号 (仅在无员工时创建)
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的环境变量使用默认值；值无法解析或 JWT 配置无效时返回错误
    pub fn from_env() -> Result<Self> {
        let config = Self {
            http_port: env_setting("HTTP_PORT", 8080).map_err(ServerError::Config)?,
            jwt: JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: env_setting("REQUEST_TIMEOUT_MS", 30000)
                .map_err(ServerError::Config)?,
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123456".into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// 使用指定 JWT 配置构建 (其余取默认值)
    ///
    /// 常用于测试场景
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            http_port: 8080,
            jwt,
            environment: "development".into(),
            request_timeout_ms: 30000,
            admin_username: "admin".into(),
            admin_password: "123456".into(),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        self.jwt
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if self.request_timeout_ms == 0 {
            return Err(ServerError::Config(
                "REQUEST_TIMEOUT_MS must be positive".into(),
            ));
        }
        if self.admin_username.is_empty() || self.admin_password.is_empty() {
            return Err(ServerError::Config(
                "ADMIN_USERNAME and ADMIN_PASSWORD must not be empty".into(),
            ));
        }
        if self.is_production() && self.admin_password == DEFAULT_PASSWORD {
            tracing::warn!("ADMIN_PASSWORD is the default password in production");
        }
        Ok(())
    }

    /// 请求超时
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

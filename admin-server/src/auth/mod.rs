//! 认证模块
//!
//! 提供管理端登录与 JWT 认证：
//! - [`JwtService`] - JWT 令牌签发与校验
//! - [`LoginService`] - 登录并签发令牌
//! - [`CurrentEmployee`] - 当前登录员工
//! - [`require_auth`] - 认证中间件

pub mod extractor;
pub mod jwt;
pub mod login;
pub mod middleware;
pub mod password;

pub use jwt::{ClaimMap, Claims, EMP_ID_CLAIM, JwtConfig, JwtError, JwtService};
pub use login::{Authenticator, LoginError, LoginService, Principal, TokenSigner};
pub use middleware::require_auth;

/// 当前登录员工 (从令牌 `empId` 解析)
///
/// 由认证中间件注入请求扩展，也可直接作为 handler 参数提取。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEmployee {
    pub id: i64,
}

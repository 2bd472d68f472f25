//! 认证中间件
//!
//! 为管理端 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentEmployee, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 无需认证的路径
const PUBLIC_PATHS: &[&str] = &["/admin/employee/login", "/health"];

/// 认证中间件 - 要求员工登录
///
/// 按顺序从以下位置读取令牌：
///
/// 1. 配置的请求头 (`ADMIN_TOKEN_NAME`, 默认 `token`)
/// 2. `Authorization: Bearer <token>`
///
/// 验证成功后将 [`CurrentEmployee`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/admin/` 路径
/// - `/admin/employee/login`
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无令牌 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非管理端路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/admin/") || PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    let employee = authenticate_headers(&state, req.headers(), &req.uri().to_string())?;
    req.extensions_mut().insert(employee);
    Ok(next.run(req).await)
}

/// 从请求头解析并校验令牌
pub(crate) fn authenticate_headers(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &str,
) -> Result<CurrentEmployee, AppError> {
    let jwt_service = state.get_jwt_service();
    let token_name = jwt_service.config().admin_token_name.as_str();

    let token = match extract_token(headers, token_name) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let id = claims.emp_id().ok_or_else(|| {
                security_log!("WARN", "auth_claim_missing", uri = uri.to_string());
                AppError::invalid_token("Token carries no employee id")
            })?;
            tracing::debug!(emp_id = id, "Token verified");
            Ok(CurrentEmployee { id })
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = uri.to_string()
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

fn extract_token<'a>(headers: &'a HeaderMap, token_name: &str) -> Option<&'a str> {
    if let Some(token) = headers
        .get(token_name)
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty())
    {
        return Some(token);
    }

    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
}

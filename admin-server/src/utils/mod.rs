//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 环境变量读取、日志等工具

pub mod logger;

use std::str::FromStr;

use axum::Json;
use serde::Serialize;

// Re-export error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// 成功响应 (无数据)
pub fn ok_empty() -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok())
}

/// 读取环境变量，未设置时使用默认值
///
/// 已设置但无法解析时返回错误，不回退到默认值。
pub fn env_setting<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    parse_setting(name, std::env::var(name).ok().as_deref(), default)
}

fn parse_setting<T: FromStr>(name: &str, raw: Option<&str>, default: T) -> Result<T, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| format!("{} has an invalid value: {:?}", name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting::<i64>("ADMIN_TTL_SECONDS", None, 7200), Ok(7200));
        assert_eq!(parse_setting::<i64>("ADMIN_TTL_SECONDS", Some(""), 7200), Ok(7200));
        assert_eq!(parse_setting::<i64>("ADMIN_TTL_SECONDS", Some(" 60 "), 7200), Ok(60));

        let err = parse_setting::<i64>("ADMIN_TTL_SECONDS", Some("1h"), 7200).unwrap_err();
        assert!(err.contains("ADMIN_TTL_SECONDS"));
        assert!(parse_setting::<u16>("HTTP_PORT", Some("70000"), 8080).is_err());
        assert!(parse_setting::<u64>("REQUEST_TIMEOUT_MS", Some("30s"), 30000).is_err());
    }
}

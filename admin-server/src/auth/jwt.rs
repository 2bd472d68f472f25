//! JWT 令牌服务
//!
//! 处理管理端 JWT 令牌的签发与校验。
//!
//! 令牌载荷由调用方提供的 claims 映射加上 `iat` / `exp` 组成：
//!
//! ```json
//! { "empId": 1, "iat": 1700000000, "exp": 1700007200 }
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::utils::env_setting;

/// 员工 ID 的 claim 名称 (签发方与校验方共用)
pub const EMP_ID_CLAIM: &str = "empId";

/// 推荐的最短密钥长度 (字节)
const MIN_SECRET_LEN: usize = 32;

/// 令牌有效期上限 (秒)，一年
pub const MAX_TTL_SECONDS: i64 = 366 * 24 * 3600;

/// claim 名称 -> 标量值
pub type ClaimMap = serde_json::Map<String, Value>;

/// JWT 配置
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// 管理端签名密钥
    pub admin_secret_key: String,
    /// 令牌有效期 (秒)
    pub admin_ttl_seconds: i64,
    /// 前端携带令牌使用的请求头名称
    pub admin_token_name: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("admin_secret_key", &"***")
            .field("admin_ttl_seconds", &self.admin_ttl_seconds)
            .field("admin_token_name", &self.admin_token_name)
            .finish()
    }
}

impl JwtConfig {
    /// 使用指定密钥和有效期创建配置 (请求头名称默认为 `token`)
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            admin_secret_key: secret.into(),
            admin_ttl_seconds: ttl_seconds,
            admin_token_name: "token".to_string(),
        }
    }

    /// 从环境变量加载配置
    ///
    /// | 环境变量 | 默认值 |
    /// |----------|--------|
    /// | ADMIN_SECRET_KEY | 开发环境自动生成 |
    /// | ADMIN_TTL_SECONDS | 7200 |
    /// | ADMIN_TOKEN_NAME | token |
    pub fn from_env() -> Result<Self, JwtError> {
        let config = Self {
            admin_secret_key: load_jwt_secret()?,
            // 默认 2 小时
            admin_ttl_seconds: env_setting("ADMIN_TTL_SECONDS", 7200)
                .map_err(JwtError::ConfigError)?,
            admin_token_name: std::env::var("ADMIN_TOKEN_NAME")
                .unwrap_or_else(|_| "token".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验签名配置
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.admin_secret_key.is_empty() {
            return Err(JwtError::ConfigError(
                "admin secret key must not be empty".to_string(),
            ));
        }
        if self.admin_ttl_seconds <= 0 || self.admin_ttl_seconds > MAX_TTL_SECONDS {
            return Err(JwtError::ConfigError(format!(
                "admin ttl must be within 1..={} seconds, got {}",
                MAX_TTL_SECONDS, self.admin_ttl_seconds
            )));
        }
        if self.admin_token_name.is_empty() {
            return Err(JwtError::ConfigError(
                "admin token header name must not be empty".to_string(),
            ));
        }
        if self.admin_secret_key.len() < MIN_SECRET_LEN {
            tracing::warn!(
                len = self.admin_secret_key.len(),
                "Admin secret key is shorter than {} bytes",
                MIN_SECRET_LEN
            );
        }
        Ok(())
    }

    /// 令牌有效期 (超出 chrono 可表示范围时为 `None`)
    pub fn ttl(&self) -> Option<Duration> {
        Duration::try_seconds(self.admin_ttl_seconds)
    }
}

/// 令牌中解析出的 Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 签发时间戳 (秒)
    pub iat: i64,
    /// 过期时间戳 (秒) = iat + ttl
    pub exp: i64,
    /// 业务 claims
    #[serde(flatten)]
    pub claims: ClaimMap,
}

impl Claims {
    /// 令牌中的员工 ID
    pub fn emp_id(&self) -> Option<i64> {
        self.claims.get(EMP_ID_CLAIM).and_then(Value::as_i64)
    }
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("密钥生成失败: {0}")]
    KeyGenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| {
        JwtError::KeyGenerationFailed("Failed to generate secure random key".to_string())
    })?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[(*b as usize) % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("ADMIN_SECRET_KEY") {
        Ok(secret) => Ok(secret),
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "ADMIN_SECRET_KEY not set! Generating secure temporary key for development."
                );
                generate_secure_printable_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "ADMIN_SECRET_KEY environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.admin_secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.admin_secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// 以当前时间签发令牌
    pub fn sign(&self, claims: &ClaimMap) -> Result<String, JwtError> {
        self.sign_at(claims, Utc::now())
    }

    /// 以指定签发时间签发令牌，`exp = issued_at + ttl`
    pub fn sign_at(&self, claims: &ClaimMap, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let expiration = self
            .config
            .ttl()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::GenerationFailed(format!(
                    "expiry overflows for ttl {}s",
                    self.config.admin_ttl_seconds
                ))
            })?;

        let mut claims = claims.clone();
        // iat/exp 由服务端决定，不允许调用方覆盖
        claims.remove("iat");
        claims.remove("exp");

        let payload = Claims {
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            claims,
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp_claims(id: i64) -> ClaimMap {
        let mut claims = ClaimMap::new();
        claims.insert(EMP_ID_CLAIM.to_string(), Value::from(id));
        claims
    }

    #[test]
    fn test_jwt_sign_and_validate() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 3600));

        let token = service
            .sign(&emp_claims(7))
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.emp_id(), Some(7));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expiry_is_issuance_plus_ttl() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 120));
        let issued_at = Utc::now();

        let token = service.sign_at(&emp_claims(1), issued_at).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp, issued_at.timestamp() + 120);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 3600));
        let issued_at = Utc::now() - Duration::seconds(3601);

        let token = service.sign_at(&emp_claims(1), issued_at).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = JwtService::with_config(JwtConfig::new("admin-key", 3600));
        let verifier = JwtService::with_config(JwtConfig::new("other-key", 3600));

        let token = signer.sign(&emp_claims(1)).unwrap();

        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 3600));
        assert!(matches!(
            service.validate_token("not-a-jwt"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_caller_cannot_override_expiry() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 60));
        let mut claims = emp_claims(3);
        claims.insert("exp".to_string(), Value::from(i64::MAX));

        let token = service.sign(&claims).unwrap();
        let decoded = service.validate_token(&token).unwrap();

        assert_eq!(decoded.exp - decoded.iat, 60);
        assert!(!decoded.claims.contains_key("exp"));
    }

    #[test]
    fn test_different_issuance_times_give_different_tokens() {
        let service = JwtService::with_config(JwtConfig::new("admin-key", 3600));
        let now = Utc::now();

        let first = service.sign_at(&emp_claims(5), now).unwrap();
        let second = service
            .sign_at(&emp_claims(5), now + Duration::seconds(1))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(service.validate_token(&first).unwrap().emp_id(), Some(5));
        assert_eq!(service.validate_token(&second).unwrap().emp_id(), Some(5));
    }

    #[test]
    fn test_config_validation() {
        assert!(JwtConfig::new("admin-key", 3600).validate().is_ok());
        assert!(matches!(
            JwtConfig::new("", 3600).validate(),
            Err(JwtError::ConfigError(_))
        ));
        assert!(matches!(
            JwtConfig::new("admin-key", 0).validate(),
            Err(JwtError::ConfigError(_))
        ));
        assert!(JwtConfig::new("admin-key", MAX_TTL_SECONDS).validate().is_ok());
        for ttl in [MAX_TTL_SECONDS + 1, 9_000_000_000_000_000, i64::MAX] {
            assert!(matches!(
                JwtConfig::new("admin-key", ttl).validate(),
                Err(JwtError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn test_oversized_ttl_fails_to_sign_without_panicking() {
        for ttl in [9_000_000_000_000_000, i64::MAX] {
            let service = JwtService::with_config(JwtConfig::new("admin-key", ttl));
            assert!(matches!(
                service.sign(&emp_claims(1)),
                Err(JwtError::GenerationFailed(_))
            ));
        }
    }

    #[test]
    fn test_printable_secret_generation() {
        let key1 = generate_secure_printable_jwt_secret().unwrap();
        let key2 = generate_secure_printable_jwt_secret().unwrap();

        assert_eq!(key1.len(), 64);
        assert!(key1.chars().all(|c| c.is_ascii_graphic()));
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("abc"), None);
    }
}

//! Login / token issuance
//!
//! Credentials are checked by an [`Authenticator`]; on success the principal id
//! is placed under [`EMP_ID_CLAIM`] and a [`TokenSigner`] mints the token.
//! Nothing is stored server-side: the token's own signature and `exp` are the
//! whole session.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared::AppError;
use shared::client::{EmployeeLoginResponse, LoginRequest};
use thiserror::Error;
use validator::Validate;

use crate::auth::jwt::{ClaimMap, EMP_ID_CLAIM, JwtError, JwtService};
use crate::security_log;

/// Authenticated employee as returned by the [`Authenticator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Validates credentials
///
/// Rejections (unknown user, wrong password, locked account) come back as an
/// [`AppError`] and are passed to the caller unchanged.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AppError>;
}

/// Signs a claims mapping into a time-limited token
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &ClaimMap) -> Result<String, JwtError>;
}

impl TokenSigner for JwtService {
    fn sign(&self, claims: &ClaimMap) -> Result<String, JwtError> {
        JwtService::sign(self, claims)
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid login request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("authentication failed: {0}")]
    Authentication(AppError),

    #[error("token signing failed: {0}")]
    Signing(#[from] JwtError),
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidRequest(e) => e.into(),
            LoginError::Authentication(e) => e,
            LoginError::Signing(e) => AppError::config(format!("Failed to sign token: {}", e)),
        }
    }
}

/// Token issuer
#[derive(Clone)]
pub struct LoginService {
    authenticator: Arc<dyn Authenticator>,
    signer: Arc<dyn TokenSigner>,
}

impl LoginService {
    pub fn new(authenticator: Arc<dyn Authenticator>, signer: Arc<dyn TokenSigner>) -> Self {
        Self {
            authenticator,
            signer,
        }
    }

    /// Authenticate and issue a token
    ///
    /// The signer is never called when authentication fails.
    pub async fn issue(&self, req: &LoginRequest) -> Result<EmployeeLoginResponse, LoginError> {
        tracing::info!(username = %req.username, "Employee login attempt");

        req.validate()?;

        let principal = match self
            .authenticator
            .authenticate(&req.username, &req.password)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = req.username.clone(),
                    code = e.code.code()
                );
                return Err(LoginError::Authentication(e));
            }
        };

        let mut claims = ClaimMap::new();
        claims.insert(EMP_ID_CLAIM.to_string(), Value::from(principal.id));

        let token = self.signer.sign(&claims).map_err(|e| {
            tracing::error!(emp_id = principal.id, error = %e, "Token signing failed");
            LoginError::Signing(e)
        })?;

        tracing::info!(
            emp_id = principal.id,
            username = %principal.username,
            "Employee logged in successfully"
        );

        Ok(EmployeeLoginResponse {
            id: principal.id,
            user_name: principal.username,
            name: principal.name,
            token,
        })
    }
}

//! JWT Extractor
//!
//! Handlers take [`CurrentEmployee`] as an argument to get the id of the
//! employee the token was issued to.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentEmployee;
use crate::auth::middleware::authenticate_headers;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(employee) = parts.extensions.get::<CurrentEmployee>() {
            return Ok(*employee);
        }

        let employee = authenticate_headers(state, &parts.headers, &parts.uri.to_string())?;

        // Store in extensions for potential reuse
        parts.extensions.insert(employee);

        Ok(employee)
    }
}

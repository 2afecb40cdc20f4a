//! Bearer-token extractor for mutating routes.
//!
//! # Invariants
//! - A handler that takes [`AuthUser`] cannot run without a verified token;
//!   the gate is enforced before any body is read or state is touched.
//! - Token failures are logged without the token itself.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use log::warn;

/// Identity proven by a valid bearer token.
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            warn!("event=auth_check module=api status=denied reason=missing_header");
            return Err(ApiError::Unauthenticated);
        };
        let value = header.to_str().map_err(|_| ApiError::Unauthenticated)?;
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

        let username = state.verifier().verify(token).map_err(|err| {
            warn!("event=auth_check module=api status=denied reason={err}");
            ApiError::from(err)
        })?;
        Ok(AuthUser(username))
    }
}

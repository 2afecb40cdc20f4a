//! API error type and the domain-error to status-code translation.
//!
//! # Invariants
//! - This module is the only place that maps domain errors to HTTP statuses.
//! - `NotFound` responses leak no entity detail beyond the status itself.
//! - Store failures surface as opaque 500s; details go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eportfolio_core::{AuthError, ServiceError};
use log::error;
use serde::Serialize;

/// Error shape returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// Referenced entity does not exist (404).
    NotFound,
    /// Missing/invalid/expired bearer token (401).
    Unauthenticated,
    /// Login failure; identical for unknown user and wrong password (401).
    InvalidCredentials,
    /// Unexpected store/infrastructure failure (500).
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "not found"),
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            Self::Internal(detail) => {
                error!("event=request_failed module=api status=error error={detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { .. } => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Unauthenticated => Self::Unauthenticated,
            AuthError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

//! Login endpoint: exchanges a username/password pair for a bearer token.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use eportfolio_core::repo::user_repo::SqliteUserRepo;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /login
///
/// Returns 401 with an identical body for unknown usernames and wrong
/// passwords; the response never reveals which part failed.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = state.conn();
    let users = SqliteUserRepo::try_new(&conn)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    let token = state
        .verifier()
        .login(&users, &request.username, &request.password)?;
    Ok(Json(LoginResponse { token }))
}

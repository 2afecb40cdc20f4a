//! Technology routes. Leaf entities: no attach-child operation.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eportfolio_core::{PortfolioService, Technology, TechnologyDraft, TechnologyId};

/// GET /technologies
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Technology>>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).list_technologies()?))
}

/// GET /technologies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<TechnologyId>,
) -> Result<Json<Technology>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).get_technology(id)?))
}

/// PUT /technologies/{id} — 200 with the updated entity; 404 when absent.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<TechnologyId>,
    Json(draft): Json<TechnologyDraft>,
) -> Result<Json<Technology>, ApiError> {
    let conn = state.conn();
    Ok(Json(
        PortfolioService::new(&conn).update_technology(id, draft)?,
    ))
}

/// DELETE /technologies/{id} — 200 on success.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<TechnologyId>,
) -> Result<StatusCode, ApiError> {
    let conn = state.conn();
    PortfolioService::new(&conn).delete_technology(id)?;
    Ok(StatusCode::OK)
}

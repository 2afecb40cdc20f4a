//! Ability routes, including the attach-child operation for technologies.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eportfolio_core::{
    Ability, AbilityDraft, AbilityId, PortfolioService, Technology, TechnologyDraft,
};

/// GET /abilities — summary projection, `technologies` serialized as null.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ability>>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).list_abilities()?))
}

/// GET /abilities/{id} — detail projection with technologies populated.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<AbilityId>,
) -> Result<Json<Ability>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).get_ability(id)?))
}

/// PUT /abilities/{id} — 200 with the updated entity; 404 when absent.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<AbilityId>,
    Json(draft): Json<AbilityDraft>,
) -> Result<Json<Ability>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).update_ability(id, draft)?))
}

/// DELETE /abilities/{id} — 200 on success, cascading to technologies.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<AbilityId>,
) -> Result<StatusCode, ApiError> {
    let conn = state.conn();
    PortfolioService::new(&conn).delete_ability(id)?;
    Ok(StatusCode::OK)
}

/// POST /abilities/{id}/technologies — 201 with the created technology; 404
/// when the ability is absent.
pub async fn add_technology(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<AbilityId>,
    Json(draft): Json<TechnologyDraft>,
) -> Result<(StatusCode, Json<Technology>), ApiError> {
    let conn = state.conn();
    let technology = PortfolioService::new(&conn).add_technology(id, draft)?;
    Ok((StatusCode::CREATED, Json(technology)))
}

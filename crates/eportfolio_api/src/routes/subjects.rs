//! Subject routes, including the attach-child operations for abilities and
//! projects.
//!
//! Read routes are public; every mutating route takes [`AuthUser`] and so
//! rejects the request before touching state when the token is invalid.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eportfolio_core::{
    Ability, AbilityDraft, PortfolioService, Project, ProjectDraft, Subject, SubjectDraft,
    SubjectId,
};

/// GET /subjects — summary projection, no child collections.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).list_subjects()?))
}

/// GET /subjects/{id} — detail projection with abilities and projects.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
) -> Result<Json<Subject>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).get_subject(id)?))
}

/// POST /subjects — 201 with the created entity.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(draft): Json<SubjectDraft>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let conn = state.conn();
    let subject = PortfolioService::new(&conn).create_subject(draft)?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// PUT /subjects/{id} — 200 with the updated entity; 404 when absent.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<SubjectId>,
    Json(draft): Json<SubjectDraft>,
) -> Result<Json<Subject>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).update_subject(id, draft)?))
}

/// DELETE /subjects/{id} — 200 on success, cascading through abilities,
/// technologies and projects.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<SubjectId>,
) -> Result<StatusCode, ApiError> {
    let conn = state.conn();
    PortfolioService::new(&conn).delete_subject(id)?;
    Ok(StatusCode::OK)
}

/// POST /subjects/{id}/abilities — 201 with the created ability; 404 when
/// the subject is absent.
pub async fn add_ability(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<SubjectId>,
    Json(draft): Json<AbilityDraft>,
) -> Result<(StatusCode, Json<Ability>), ApiError> {
    let conn = state.conn();
    let ability = PortfolioService::new(&conn).add_ability(id, draft)?;
    Ok((StatusCode::CREATED, Json(ability)))
}

/// POST /subjects/{id}/projects — 201 with the created project; 404 when
/// the subject is absent.
pub async fn add_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<SubjectId>,
    Json(draft): Json<ProjectDraft>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let conn = state.conn();
    let project = PortfolioService::new(&conn).add_project(id, draft)?;
    Ok((StatusCode::CREATED, Json(project)))
}

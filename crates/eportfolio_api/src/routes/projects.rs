//! Project routes. Flat children of subjects: no attach-child operation here;
//! creation happens through POST /subjects/{id}/projects.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eportfolio_core::{PortfolioService, Project, ProjectDraft, ProjectId};

/// GET /projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).list_projects()?))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Json<Project>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).get_project(id)?))
}

/// PUT /projects/{id} — 200 with the updated entity; 404 when absent.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<ProjectId>,
    Json(draft): Json<ProjectDraft>,
) -> Result<Json<Project>, ApiError> {
    let conn = state.conn();
    Ok(Json(PortfolioService::new(&conn).update_project(id, draft)?))
}

/// DELETE /projects/{id} — 200 on success.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<ProjectId>,
) -> Result<StatusCode, ApiError> {
    let conn = state.conn();
    PortfolioService::new(&conn).delete_project(id)?;
    Ok(StatusCode::OK)
}

//! Route table for the portfolio REST surface.
//!
//! Collection paths are registered with and without a trailing slash so both
//! `GET /subjects` and `GET /subjects/` resolve. Nested ability/technology
//! item routes use the flat `/abilities/{id}` / `/technologies/{id}` pattern;
//! only attach-child operations are nested under their parent.

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod abilities;
pub mod health;
pub mod login;
pub mod projects;
pub mod subjects;
pub mod technologies;

/// Builds the application router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/login", post(login::login))
        .route("/subjects", get(subjects::list).post(subjects::create))
        .route("/subjects/", get(subjects::list).post(subjects::create))
        .route(
            "/subjects/{id}",
            get(subjects::get_by_id)
                .put(subjects::update)
                .delete(subjects::delete),
        )
        .route("/subjects/{id}/abilities", post(subjects::add_ability))
        .route("/subjects/{id}/projects", post(subjects::add_project))
        .route("/abilities", get(abilities::list))
        .route("/abilities/", get(abilities::list))
        .route(
            "/abilities/{id}",
            get(abilities::get_by_id)
                .put(abilities::update)
                .delete(abilities::delete),
        )
        .route(
            "/abilities/{id}/technologies",
            post(abilities::add_technology),
        )
        .route("/technologies", get(technologies::list))
        .route("/technologies/", get(technologies::list))
        .route(
            "/technologies/{id}",
            get(technologies::get_by_id)
                .put(technologies::update)
                .delete(technologies::delete),
        )
        .route("/projects", get(projects::list))
        .route("/projects/", get(projects::list))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

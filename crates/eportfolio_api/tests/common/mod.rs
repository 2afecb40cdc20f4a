//! Shared helpers for API integration tests: an in-memory app instance plus
//! request/response plumbing.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use eportfolio_api::{router, AppState};
use eportfolio_core::auth::hash_password;
use eportfolio_core::db::open_db_in_memory;
use eportfolio_core::model::user::Credential;
use eportfolio_core::repo::user_repo::{SqliteUserRepo, UserRepository};
use eportfolio_core::CredentialVerifier;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "hunter2";

/// Builds a full application over a fresh in-memory database with the test
/// credential seeded.
pub fn app() -> Router {
    let conn = open_db_in_memory().unwrap();
    {
        let users = SqliteUserRepo::try_new(&conn).unwrap();
        users
            .upsert(&Credential {
                username: USERNAME.to_string(),
                password_hash: hash_password(PASSWORD),
            })
            .unwrap();
    }
    let verifier = CredentialVerifier::new(b"integration-secret".as_slice(), 3600);
    router(AppState::new(conn, verifier))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Builds a request with a JSON body and, when `token` is set, a bearer
/// Authorization header.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Builds a bodyless request (used for DELETE) with an optional bearer token.
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Logs in with the seeded credential and returns the bearer token.
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/login",
            None,
            json!({ "username": USERNAME, "password": PASSWORD }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

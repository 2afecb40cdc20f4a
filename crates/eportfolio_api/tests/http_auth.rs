//! Authentication behavior over the HTTP surface: login responses and the
//! bearer gate on mutating routes.

mod common;

use axum::http::StatusCode;
use common::{app, bare_request, body_json, get, json_request, login, send, PASSWORD, USERNAME};
use serde_json::json;

#[tokio::test]
async fn login_returns_a_usable_token() {
    let app = app();

    let token = login(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/subjects",
            Some(&token),
            json!({ "name": "Backend", "icon": "code", "image": "img.png" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user_identically() {
    let app = app();

    let wrong_password = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            json!({ "username": USERNAME, "password": "nope" }),
        ),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(wrong_password).await;

    let unknown_user = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            json!({ "username": "ghost", "password": PASSWORD }),
        ),
    )
    .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_json(unknown_user).await;

    assert_eq!(wrong_password_body, unknown_user_body);
    assert_eq!(wrong_password_body["error"], "invalid credentials");
}

#[tokio::test]
async fn mutating_route_without_token_is_rejected() {
    let app = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/subjects",
            None,
            json!({ "name": "Backend", "icon": "code", "image": "img.png" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthenticated");

    // The rejected create must not have touched the store.
    let list = body_json(send(&app, get("/subjects")).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn mutating_route_with_garbage_token_is_rejected_without_state_change() {
    let app = app();
    let token = login(&app).await;

    let created = send(
        &app,
        json_request(
            "POST",
            "/subjects",
            Some(&token),
            json!({ "name": "Backend", "icon": "code", "image": "img.png" }),
        ),
    )
    .await;
    let subject_id = body_json(created).await["id"].as_i64().unwrap();

    let response = send(
        &app,
        bare_request(
            "DELETE",
            &format!("/subjects/{subject_id}"),
            Some("not-a-token"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The rejected delete must leave the subject in place.
    let detail = send(&app, get(&format!("/subjects/{subject_id}"))).await;
    assert_eq!(detail.status(), StatusCode::OK);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = app();
    let token = login(&app).await;
    let last = token.chars().last().unwrap();
    let mut tampered = token[..token.len() - 1].to_string();
    tampered.push(if last == '0' { '1' } else { '0' });

    let response = send(&app, bare_request("DELETE", "/subjects/1", Some(&tampered))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn read_routes_are_public() {
    let app = app();

    let response = send(&app, get("/subjects")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

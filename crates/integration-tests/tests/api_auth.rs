//! Registration, login and `/api/me` over HTTP.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::TimeDelta;
use serde_json::json;

use meezy_api::app;
use meezy_integration_tests::{call, register, send, state_with, test_config, test_state};

#[tokio::test]
async fn test_register_returns_token_and_profile() {
    let app = app(test_state().await);

    let response = call(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(&json!({"name": "Asha", "email": "asha@meezy.in", "password": "pw1", "role": "seller"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(
        response.body["user"],
        json!({"id": 1, "name": "Asha", "email": "asha@meezy.in", "role": "seller"})
    );
    assert!(response.body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_defaults_to_buyer() {
    let app = app(test_state().await);
    let response = call(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(&json!({"name": "Ravi", "email": "ravi@meezy.in", "password": "pw"})),
    )
    .await;

    assert_eq!(response.body["user"]["role"], "buyer");
}

#[tokio::test]
async fn test_register_validation() {
    let state = test_state().await;
    let app = app(state.clone());

    let cases = [
        (json!({"email": "a@meezy.in", "password": "pw"}), "Name, email, password required"),
        (json!({"name": "A", "password": "pw"}), "Name, email, password required"),
        (json!({"name": "A", "email": "a@meezy.in", "password": ""}), "Name, email, password required"),
        (json!({"name": "A", "email": "not-an-email", "password": "pw"}), "Invalid email address"),
        (json!({"name": "A", "email": "a@meezy.in", "password": "pw", "role": "admin"}), "Invalid role"),
    ];

    for (body, message) in cases {
        let response = call(&app, Method::POST, "/api/register", None, Some(&body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.error(), Some(message), "{body}");
    }
    assert_eq!(state.store().users().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let state = test_state().await;
    let app = app(state.clone());
    register(&app, "Asha", "asha@meezy.in", "pw1").await;

    let response = call(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(&json!({"name": "Other", "email": "asha@meezy.in", "password": "pw2"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Email already exists"));
    assert_eq!(state.store().users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_login() {
    let app = app(test_state().await);
    register(&app, "Asha", "asha@meezy.in", "pw1").await;

    let ok = call(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(&json!({"email": "asha@meezy.in", "password": "pw1"})),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["user"]["name"], "Asha");

    let token = ok.body["token"].as_str().unwrap();
    let me = call(&app, Method::GET, "/api/me", Some(token), None).await;
    assert_eq!(me.body["id"], ok.body["user"]["id"]);

    for body in [
        json!({"email": "asha@meezy.in", "password": "wrong"}),
        json!({"email": "nobody@meezy.in", "password": "pw1"}),
    ] {
        let response = call(&app, Method::POST, "/api/login", None, Some(&body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), Some("Invalid credentials"));
    }

    let missing = call(&app, Method::POST, "/api/login", None, Some(&json!({"email": "asha@meezy.in"}))).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), Some("Email and password required"));
}

#[tokio::test]
async fn test_me() {
    let app = app(test_state().await);
    let token = register(&app, "Asha", "asha@meezy.in", "pw1").await;

    let response = call(&app, Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"id": 1, "name": "Asha", "email": "asha@meezy.in", "role": "buyer"})
    );
}

#[tokio::test]
async fn test_me_token_errors() {
    let app = app(test_state().await);

    let missing = call(&app, Method::GET, "/api/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error(), Some("Missing token"));

    let invalid = call(&app, Method::GET, "/api/me", Some("not.a.token"), None).await;
    assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid.error(), Some("Invalid token"));

    let basic = send(
        &app,
        Request::builder()
            .uri("/api/me")
            .header(header::AUTHORIZATION, "Basic YTpi")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic.error(), Some("Invalid token"));
}

#[tokio::test]
async fn test_me_with_token_for_unknown_user() {
    // Same secret, separate store: the token verifies but names no one here.
    let issuer = app(test_state().await);
    let token = register(&issuer, "Asha", "asha@meezy.in", "pw1").await;

    let app = app(test_state().await);
    let response = call(&app, Method::GET, "/api/me", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("Invalid token"));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let mut config = test_config();
    config.token_ttl = TimeDelta::minutes(-5);
    let app = app(state_with(config).await);

    let token = register(&app, "Asha", "asha@meezy.in", "pw1").await;
    let response = call(&app, Method::GET, "/api/me", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("Invalid token"));
}

#[tokio::test]
async fn test_malformed_json_is_a_json_400() {
    let app = app(test_state().await);

    let response = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().is_some());
}

#[tokio::test]
async fn test_body_without_json_content_type_is_a_json_400() {
    let state = test_state().await;
    let app = app(state.clone());

    let response = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/register")
            .body(Body::from(r#"{"name": "A", "email": "a@meezy.in", "password": "pw"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().is_some_and(|e| e.contains("Content-Type")));
    assert_eq!(state.store().users().count().await.unwrap(), 0);
}

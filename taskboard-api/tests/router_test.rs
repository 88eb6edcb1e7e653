/// Router tests that need no database
///
/// Every request here is rejected before the first query: by the bearer
/// layer, by body parsing, or by validation.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{lazy_app, send, token_for, TEST_JWT_SECRET};
use serde_json::json;
use taskboard_shared::auth::jwt::{create_token, Claims};
use uuid::Uuid;

const PROTECTED: &[(&str, &str)] = &[
    ("POST", "/users/create-project"),
    ("POST", "/users/update-project/00000000-0000-0000-0000-000000000001"),
    ("DELETE", "/users/delete-project/00000000-0000-0000-0000-000000000001"),
    ("POST", "/users/create-task"),
    ("POST", "/users/update-task/00000000-0000-0000-0000-000000000001"),
    ("DELETE", "/users/delete-task/00000000-0000-0000-0000-000000000001"),
    ("POST", "/users/assign-task/00000000-0000-0000-0000-000000000001"),
    ("GET", "/users/get-my-tasks"),
    ("GET", "/users/get-my-projects"),
];

fn assert_unauthenticated(status: StatusCode, body: &serde_json::Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["message"], "Authentication failed.");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = lazy_app();

    for (method, uri) in PROTECTED {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_unauthenticated(status, &body);
    }
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let app = lazy_app();
    let claims = Claims::for_user(Uuid::new_v4(), Duration::hours(1));
    let token = create_token(&claims, "a-completely-different-secret-of-32-chars").unwrap();

    let (status, body) = send(&app, "GET", "/users/get-my-tasks", Some(&token), None).await;
    assert_unauthenticated(status, &body);
}

#[tokio::test]
async fn test_wrong_role_is_rejected() {
    let app = lazy_app();
    let claims = Claims::with_role(Uuid::new_v4(), "admin", Duration::hours(1));
    let token = create_token(&claims, TEST_JWT_SECRET).unwrap();

    let (status, body) = send(&app, "GET", "/users/get-my-projects", Some(&token), None).await;
    assert_unauthenticated(status, &body);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = lazy_app();
    let claims = Claims::for_user(Uuid::new_v4(), Duration::hours(-1));
    let token = create_token(&claims, TEST_JWT_SECRET).unwrap();

    let (status, body) = send(&app, "GET", "/users/get-my-tasks", Some(&token), None).await;
    assert_unauthenticated(status, &body);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = lazy_app();

    let (status, body) = send(&app, "GET", "/users/get-my-tasks", Some("not.a.jwt"), None).await;
    assert_unauthenticated(status, &body);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let app = lazy_app();
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/users/get-my-tasks")
        .header("authorization", format!("Basic {}", token_for(Uuid::new_v4())))
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, body) = common::send_request(&app, request).await;
    assert_unauthenticated(status, &body);
}

#[tokio::test]
async fn test_signup_password_mismatch() {
    let app = lazy_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users/signup",
        None,
        Some(json!({
            "first_name": "Ada",
            "email": "ada@example.com",
            "password": "Secret@123",
            "confirm_password": "Secret@124"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Password and confirm password must be same.");
}

#[tokio::test]
async fn test_signup_weak_password() {
    let app = lazy_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users/signup",
        None,
        Some(json!({
            "first_name": "Ada",
            "email": "ada@example.com",
            "password": "password",
            "confirm_password": "password"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed.");
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = lazy_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users/signup",
        None,
        Some(json!({
            "first_name": "Ada",
            "email": "nope",
            "password": "Secret@123",
            "confirm_password": "Secret@123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_signup_missing_field_uses_envelope() {
    let app = lazy_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users/signup",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("first_name"));
}

#[tokio::test]
async fn test_malformed_json_uses_envelope() {
    let app = lazy_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/users/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();

    let (status, body) = common::send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = lazy_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users/login",
        None,
        Some(json!({ "email": "", "password": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

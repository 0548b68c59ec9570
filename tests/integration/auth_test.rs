//! Integration tests for the authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_login_success() {
    let app = TestApp::new().await;
    let login = app.create_account("login-ok", None).await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "login": login, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
    assert_eq!(response.body["data"]["token_type"], "bearer");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_login_wrong_password_and_unknown_login_look_alike() {
    let app = TestApp::new().await;
    let login = app.create_account("login-bad", None).await;

    let wrong = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "login": login, "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "login": "nobody-here", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.body["error"], "AUTHENTICATION");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_me_requires_bearer() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/auth/me", None, Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "TOKEN_INVALID");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_me_returns_own_account_without_role() {
    let app = TestApp::new().await;
    let login = app.create_account("me", None).await;
    let (access, _) = app.login(&login).await;

    let response = app.request("GET", "/auth/me", None, Some(&access)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["login"], login.as_str());
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_logout_revokes_both_tokens() {
    let app = TestApp::new().await;
    let login = app.create_account("logout", None).await;
    let (access, refresh) = app.login(&login).await;

    let response = app
        .request(
            "POST",
            "/auth/logout",
            Some(json!({ "access_token": access, "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::RESET_CONTENT);

    let me = app.request("GET", "/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.body["error"], "TOKEN_REVOKED");

    let again = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "access_token": access, "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_refresh_rotates_pair() {
    let app = TestApp::new().await;
    let login = app.create_account("refresh", None).await;
    let (access, refresh) = app.login(&login).await;

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "access_token": access, "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let new_access = response.body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string();
    let new_refresh = response.body["data"]["refresh_token"]
        .as_str()
        .expect("refresh token")
        .to_string();
    assert_ne!(new_access, access);
    assert_ne!(new_refresh, refresh);

    let old = app.request("GET", "/auth/me", None, Some(&access)).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let fresh = app.request("GET", "/auth/me", None, Some(&new_access)).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_login_body_validation() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/auth/login", Some(json!({ "login": "" , "password": "x" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION");
}

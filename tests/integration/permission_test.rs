//! Integration tests for `(service, operation)` permission checks.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TEST_YEAR, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_account_without_role_is_forbidden() {
    let app = TestApp::new().await;
    let login = app.create_account("norole", None).await;
    let (access, _) = app.login(&login).await;

    let response = app.request("GET", "/role", None, Some(&access)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_teacher_can_read_but_not_delete() {
    let app = TestApp::new().await;
    let admin = app.create_account("admin", Some("Admin")).await;
    let teacher = app.create_account("teacher", Some("Teacher")).await;
    let (admin_token, _) = app.login(&admin).await;
    let (teacher_token, _) = app.login(&teacher).await;

    let profile = app
        .request(
            "POST",
            "/profile",
            Some(json!({
                "firstname": "Alice",
                "lastname": "Martin",
                "mail": format!("{teacher}@univ.example"),
                "quota": 192,
                "academic_year": TEST_YEAR,
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(profile.status, StatusCode::CREATED, "{:?}", profile.body);
    let profile_id = profile.body["data"]["id"].as_str().expect("profile id").to_string();

    let list = app
        .request(
            "GET",
            &format!("/profile/{profile_id}/affectation"),
            None,
            Some(&teacher_token),
        )
        .await;
    assert_eq!(list.status, StatusCode::OK);

    let delete = app
        .request(
            "DELETE",
            &format!("/profile/{profile_id}"),
            None,
            Some(&teacher_token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let delete = app
        .request(
            "DELETE",
            &format!("/profile/{profile_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_admin_lists_permission_matrix() {
    let app = TestApp::new().await;
    let admin = app.create_account("perm-admin", Some("Admin")).await;
    let (token, _) = app.login(&admin).await;

    let response = app.request("GET", "/permission", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    // 10 services x 4 operations
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(40));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_duplicate_login_conflicts() {
    let app = TestApp::new().await;
    let admin = app.create_account("dup-admin", Some("Admin")).await;
    let (token, _) = app.login(&admin).await;

    let response = app
        .request(
            "POST",
            "/account",
            Some(json!({ "login": admin, "password": crate::helpers::PASSWORD })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

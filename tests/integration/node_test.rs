//! Integration tests for the node hierarchy and tree building.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

async fn admin(app: &TestApp) -> String {
    let login = app.create_account("node-admin", Some("Admin")).await;
    app.login(&login).await.0
}

async fn create_node(app: &TestApp, token: &str, name: &str, parent_id: &str) -> String {
    let response = app
        .request(
            "POST",
            "/node",
            Some(json!({ "name": name, "parent_id": parent_id })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["id"]
        .as_str()
        .expect("node id")
        .to_string()
}

fn child_names(tree: &Value) -> Vec<&str> {
    tree["children"]
        .as_array()
        .map(|c| c.iter().filter_map(|n| n["name"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_subtree_nests_children() {
    let app = TestApp::new().await;
    let token = admin(&app).await;
    let root = app.root_id().await.to_string();

    let top = create_node(&app, &token, &format!("top-{}", Uuid::new_v4()), &root).await;
    let _a = create_node(&app, &token, "A", &top).await;
    let b = create_node(&app, &token, "B", &top).await;
    let _c = create_node(&app, &token, "C", &b).await;

    let response = app
        .request("GET", &format!("/node/{top}/tree"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let tree = &response.body["data"];
    let mut names = child_names(tree);
    names.sort_unstable();
    assert_eq!(names, vec!["A", "B"]);

    let b_tree = tree["children"]
        .as_array()
        .and_then(|c| c.iter().find(|n| n["name"] == "B"))
        .expect("B in tree");
    assert_eq!(child_names(b_tree), vec!["C"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_single_level_lists_child_ids() {
    let app = TestApp::new().await;
    let token = admin(&app).await;
    let root = app.root_id().await.to_string();

    let top = create_node(&app, &token, "single-level", &root).await;
    let child = create_node(&app, &token, "child", &top).await;

    let response = app
        .request("GET", &format!("/node/{top}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["child_node_ids"], json!([child]));
    assert_eq!(response.body["data"]["ue_ids"], json!([]));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_delete_requires_no_children() {
    let app = TestApp::new().await;
    let token = admin(&app).await;
    let root = app.root_id().await.to_string();

    let parent = create_node(&app, &token, "parent", &root).await;
    let child = create_node(&app, &token, "child", &parent).await;

    let response = app
        .request("DELETE", &format!("/node/{parent}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CANNOT_DELETE_CHILDREN");

    let ue = app
        .request(
            "POST",
            "/ue",
            Some(json!({ "name": "UE 1", "parent_id": child })),
            Some(&token),
        )
        .await;
    assert_eq!(ue.status, StatusCode::CREATED, "{:?}", ue.body);
    let ue_id = ue.body["data"]["id"].as_str().expect("ue id").to_string();

    let response = app
        .request("DELETE", &format!("/node/{child}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("DELETE", &format!("/ue/{ue_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("DELETE", &format!("/node/{child}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("DELETE", &format!("/node/{parent}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_root_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = admin(&app).await;
    let root = app.root_id().await;

    let response = app
        .request("DELETE", &format!("/node/{root}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_node_cannot_move_below_itself() {
    let app = TestApp::new().await;
    let token = admin(&app).await;
    let root = app.root_id().await.to_string();

    let top = create_node(&app, &token, "mover", &root).await;
    let below = create_node(&app, &token, "below", &top).await;

    let response = app
        .request(
            "PATCH",
            &format!("/node/{top}"),
            Some(json!({ "parent_id": below })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database in COURSEHUB_DATABASE__URL"]
async fn test_unknown_node_is_not_found() {
    let app = TestApp::new().await;
    let token = admin(&app).await;

    let response = app
        .request("GET", &format!("/node/{}", Uuid::new_v4()), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

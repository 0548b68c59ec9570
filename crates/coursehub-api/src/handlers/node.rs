//! Node handlers: tree retrieval and hierarchy edits.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_entity::node::model::Node;
use coursehub_entity::node::tree::{NodeTree, NodeWithChildIds};

use crate::dto::request::{CreateNodeBody, UpdateNodeBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson, YearQuery};
use crate::state::AppState;

/// GET /node/tree?year=2024
pub async fn get_tree(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<ApiResponse<NodeTree>>> {
    let tree = state.node_service.get_tree(&auth, query.year).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /node/{id}/tree
pub async fn get_subtree(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<NodeTree>>> {
    let tree = state.node_service.get_subtree(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /node/{id}
pub async fn get_node(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<NodeWithChildIds>>> {
    let node = state.node_service.get_node(&auth, id).await?;
    Ok(Json(ApiResponse::ok(node)))
}

/// POST /node
pub async fn create_node(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateNodeBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Node>>)> {
    let node = state.node_service.create_node(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(node))))
}

/// PATCH /node/{id}
pub async fn update_node(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateNodeBody>,
) -> ApiResult<Json<ApiResponse<Node>>> {
    let node = state
        .node_service
        .update_node(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(node)))
}

/// DELETE /node/{id}
pub async fn delete_node(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.node_service.delete_node(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Role and permission handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_entity::permission::model::Permission;
use coursehub_entity::permission::role::{Role, RoleWithPermissions};

use crate::dto::request::{RoleBody, SetPermissionsBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson};
use crate::state::AppState;

/// GET /role
pub async fn list_roles(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<Vec<Role>>>> {
    let roles = state.role_service.list_roles(&auth).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// GET /role/{id}
pub async fn get_role(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<RoleWithPermissions>>> {
    let role = state.role_service.get_role(&auth, id).await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// POST /role
pub async fn create_role(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<RoleBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Role>>)> {
    let role = state.role_service.create_role(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role))))
}

/// PATCH /role/{id}
pub async fn update_role(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<RoleBody>,
) -> ApiResult<Json<ApiResponse<Role>>> {
    let role = state
        .role_service
        .update_role(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// DELETE /role/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.role_service.delete_role(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /role/{id}/permissions
pub async fn set_permissions(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<SetPermissionsBody>,
) -> ApiResult<Json<ApiResponse<RoleWithPermissions>>> {
    let role = state
        .role_service
        .set_permissions(&auth, id, body.permission_ids)
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// GET /permission
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<Vec<Permission>>>> {
    let permissions = state.role_service.list_permissions(&auth).await?;
    Ok(Json(ApiResponse::ok(permissions)))
}

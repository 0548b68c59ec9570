//! Account handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_core::types::pagination::PageResponse;
use coursehub_entity::account::model::Account;
use coursehub_entity::permission::metadata::AccountMetadata;

use crate::dto::request::{CreateAccountBody, SetRoleBody, UpdateAccountBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /account
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Account>>>> {
    let page = state
        .account_service
        .list_accounts(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /account/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Account>>> {
    let account = state.account_service.get_account(&auth, id).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// POST /account
pub async fn create_account(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateAccountBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Account>>)> {
    let account = state
        .account_service
        .create_account(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}

/// PATCH /account/{id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateAccountBody>,
) -> ApiResult<Json<ApiResponse<Account>>> {
    let account = state
        .account_service
        .update_account(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// DELETE /account/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /account/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<SetRoleBody>,
) -> ApiResult<Json<ApiResponse<AccountMetadata>>> {
    let metadata = state
        .account_service
        .set_role(&auth, id, body.academic_year, body.role_id)
        .await?;
    Ok(Json(ApiResponse::ok(metadata)))
}

//! Profile handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_core::types::pagination::PageResponse;
use coursehub_entity::account::profile::Profile;
use coursehub_entity::course::affectation::Affectation;

use crate::dto::request::{CreateProfileBody, LinkAccountBody, UpdateProfileBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, PaginationParams, ValidatedJson, YearQuery};
use crate::state::AppState;

/// GET /profile?year=2024
pub async fn list_profiles(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Query(year): Query<YearQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Profile>>>> {
    let page = state
        .profile_service
        .list_profiles(&auth, year.year, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profile_service.get_profile(&auth, id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// POST /profile
pub async fn create_profile(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateProfileBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Profile>>)> {
    let profile = state
        .profile_service
        .create_profile(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(profile))))
}

/// PATCH /profile/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateProfileBody>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state
        .profile_service
        .update_profile(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /profile/{id}/account
pub async fn link_account(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<LinkAccountBody>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state
        .profile_service
        .link_account(&auth, id, body.account_id)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// DELETE /profile/{id}
pub async fn delete_profile(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.profile_service.delete_profile(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /profile/{id}/affectation
pub async fn list_affectations(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Affectation>>>> {
    let affectations = state.affectation_service.list_by_profile(&auth, id).await?;
    Ok(Json(ApiResponse::ok(affectations)))
}

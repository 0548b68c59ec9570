//! UE handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_entity::node::ue::Ue;
use coursehub_service::node::ue::UeWithCourses;

use crate::dto::request::{CreateUeBody, UpdateUeBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson};
use crate::state::AppState;

/// GET /ue/{id}
pub async fn get_ue(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<UeWithCourses>>> {
    let ue = state.ue_service.get_ue(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ue)))
}

/// POST /ue
pub async fn create_ue(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateUeBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Ue>>)> {
    let ue = state.ue_service.create_ue(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ue))))
}

/// PATCH /ue/{id}
pub async fn update_ue(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateUeBody>,
) -> ApiResult<Json<ApiResponse<Ue>>> {
    let ue = state.ue_service.update_ue(&auth, id, body.into()).await?;
    Ok(Json(ApiResponse::ok(ue)))
}

/// DELETE /ue/{id}
pub async fn delete_ue(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.ue_service.delete_ue(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /ue/{id}/course/{course_id}
pub async fn attach_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path((id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state.ue_service.attach_course(&auth, id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /ue/{id}/course/{course_id}
pub async fn detach_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path((id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state.ue_service.detach_course(&auth, id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Affectation handlers. Listings live under `/profile/{id}` and
//! `/course/{id}`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_entity::course::affectation::Affectation;

use crate::dto::request::{CreateAffectationBody, UpdateHoursBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson};
use crate::state::AppState;

/// POST /affectation
pub async fn create_affectation(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateAffectationBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Affectation>>)> {
    let affectation = state
        .affectation_service
        .create_affectation(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(affectation))))
}

/// PATCH /affectation/{id}
pub async fn update_hours(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateHoursBody>,
) -> ApiResult<Json<ApiResponse<Affectation>>> {
    let affectation = state
        .affectation_service
        .update_hours(&auth, id, body.hours)
        .await?;
    Ok(Json(ApiResponse::ok(affectation)))
}

/// DELETE /affectation/{id}
pub async fn delete_affectation(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .affectation_service
        .delete_affectation(&auth, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

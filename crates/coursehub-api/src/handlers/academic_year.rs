//! Academic year handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use coursehub_entity::academic_year::AcademicYear;

use crate::dto::request::CreateAcademicYearBody;
use crate::dto::response::{AcademicYearCreated, ApiResponse};
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson};
use crate::state::AppState;

/// GET /academic-year
pub async fn list_years(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<Vec<AcademicYear>>>> {
    let years = state.academic_year_service.list_years(&auth).await?;
    Ok(Json(ApiResponse::ok(years)))
}

/// GET /academic-year/current
pub async fn get_current(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<AcademicYear>>> {
    let year = state.academic_year_service.get_current(&auth).await?;
    Ok(Json(ApiResponse::ok(year)))
}

/// POST /academic-year
pub async fn create_year(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateAcademicYearBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AcademicYearCreated>>)> {
    let (year, root) = state
        .academic_year_service
        .create_year(&auth, body.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AcademicYearCreated { year, root })),
    ))
}

/// PUT /academic-year/{year}/current
pub async fn set_current(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(year): Path<i32>,
) -> ApiResult<Json<ApiResponse<AcademicYear>>> {
    let year = state.academic_year_service.set_current(&auth, year).await?;
    Ok(Json(ApiResponse::ok(year)))
}

//! Course and course type handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coursehub_core::error::AppError;
use coursehub_core::types::pagination::PageResponse;
use coursehub_entity::course::affectation::Affectation;
use coursehub_entity::course::model::{Course, CourseType};

use crate::dto::request::{CourseTypeBody, CreateCourseBody, UpdateCourseBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, PaginationParams, ValidatedJson, YearQuery};
use crate::state::AppState;

/// GET /course?year=2024
pub async fn list_courses(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Query(year): Query<YearQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Course>>>> {
    let page = state
        .course_service
        .list_courses(&auth, year.year, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /course/{id}
pub async fn get_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Course>>> {
    let course = state.course_service.get_course(&auth, id).await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// POST /course
pub async fn create_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CreateCourseBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Course>>)> {
    let course = state
        .course_service
        .create_course(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(course))))
}

/// PATCH /course/{id}
pub async fn update_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateCourseBody>,
) -> ApiResult<Json<ApiResponse<Course>>> {
    let course = state
        .course_service
        .update_course(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// DELETE /course/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.course_service.delete_course(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /course/{id}/affectation
pub async fn list_affectations(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Affectation>>>> {
    let affectations = state.affectation_service.list_by_course(&auth, id).await?;
    Ok(Json(ApiResponse::ok(affectations)))
}

/// GET /course-type
pub async fn list_course_types(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<Vec<CourseType>>>> {
    let types = state.course_type_service.list_course_types(&auth).await?;
    Ok(Json(ApiResponse::ok(types)))
}

/// POST /course-type
pub async fn create_course_type(
    State(state): State<AppState>,
    auth: CurrentAccount,
    ValidatedJson(body): ValidatedJson<CourseTypeBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CourseType>>)> {
    let name = body
        .name
        .as_deref()
        .ok_or_else(|| AppError::validation("Course type name is required"))?;
    let course_type = state
        .course_type_service
        .create_course_type(&auth, name, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(course_type))))
}

/// PATCH /course-type/{id}
pub async fn update_course_type(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CourseTypeBody>,
) -> ApiResult<Json<ApiResponse<CourseType>>> {
    let course_type = state
        .course_type_service
        .update_course_type(&auth, id, body.name.as_deref(), body.description.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(course_type)))
}

/// DELETE /course-type/{id}
pub async fn delete_course_type(
    State(state): State<AppState>,
    auth: CurrentAccount,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.course_type_service.delete_course_type(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Course management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_database::repositories::{
    AcademicYearRepository, CourseRepository, CourseTypeRepository,
};
use coursehub_entity::course::{Course, CreateCourse};
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Request to update a course.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateCourseRequest {
    /// New name.
    pub name: Option<String>,
    /// New hours.
    pub hours: Option<i32>,
    /// New course type.
    pub course_type_id: Option<Uuid>,
}

/// Manages courses.
#[derive(Debug, Clone)]
pub struct CourseService {
    course_repo: Arc<CourseRepository>,
    course_type_repo: Arc<CourseTypeRepository>,
    year_repo: Arc<AcademicYearRepository>,
    checker: Arc<PermissionChecker>,
}

impl CourseService {
    /// Creates a new course service.
    pub fn new(
        course_repo: Arc<CourseRepository>,
        course_type_repo: Arc<CourseTypeRepository>,
        year_repo: Arc<AcademicYearRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            course_repo,
            course_type_repo,
            year_repo,
            checker,
        }
    }

    /// Courses of an academic year.
    pub async fn list_courses(
        &self,
        ctx: &RequestContext,
        academic_year: i32,
        page: PageRequest,
    ) -> AppResult<PageResponse<Course>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseService, Operation::Get)
            .await?;
        self.course_repo
            .find_by_year(academic_year, &page.normalized())
            .await
    }

    /// One course.
    pub async fn get_course(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<Course> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseService, Operation::Get)
            .await?;
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))
    }

    /// Create a course.
    pub async fn create_course(&self, ctx: &RequestContext, req: CreateCourse) -> AppResult<Course> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseService, Operation::Create)
            .await?;

        self.ensure_course_type(req.course_type_id).await?;
        if self.year_repo.find_by_year(req.academic_year).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Academic year {} not found",
                req.academic_year
            )));
        }

        let course = self.course_repo.create(&req).await?;
        info!(course_id = %course.id, academic_year = course.academic_year, "Course created");
        Ok(course)
    }

    /// Update a course.
    pub async fn update_course(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
        req: UpdateCourseRequest,
    ) -> AppResult<Course> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseService, Operation::Update)
            .await?;

        if let Some(course_type_id) = req.course_type_id {
            self.ensure_course_type(course_type_id).await?;
        }

        self.course_repo
            .update(course_id, req.name.as_deref(), req.hours, req.course_type_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))
    }

    /// Delete a course.
    pub async fn delete_course(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseService, Operation::Delete)
            .await?;
        if !self.course_repo.delete(course_id).await? {
            return Err(AppError::not_found(format!("Course {course_id} not found")));
        }
        info!(%course_id, deleted_by = %ctx.account_id, "Course deleted");
        Ok(())
    }

    async fn ensure_course_type(&self, course_type_id: Uuid) -> AppResult<()> {
        match self.course_type_repo.find_by_id(course_type_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "Course type {course_type_id} not found"
            ))),
        }
    }
}

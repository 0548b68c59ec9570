//! Course type management.

use std::sync::Arc;

use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::CourseTypeRepository;
use coursehub_entity::course::CourseType;
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Manages course types.
#[derive(Debug, Clone)]
pub struct CourseTypeService {
    course_type_repo: Arc<CourseTypeRepository>,
    checker: Arc<PermissionChecker>,
}

impl CourseTypeService {
    /// Creates a new course type service.
    pub fn new(course_type_repo: Arc<CourseTypeRepository>, checker: Arc<PermissionChecker>) -> Self {
        Self {
            course_type_repo,
            checker,
        }
    }

    /// Every course type.
    pub async fn list_course_types(&self, ctx: &RequestContext) -> AppResult<Vec<CourseType>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseTypeService, Operation::Get)
            .await?;
        self.course_type_repo.find_all().await
    }

    /// Create a course type with a unique name.
    pub async fn create_course_type(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<CourseType> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseTypeService, Operation::Create)
            .await?;
        self.course_type_repo.create(name.trim(), description).await
    }

    /// Update a course type.
    pub async fn update_course_type(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<CourseType> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseTypeService, Operation::Update)
            .await?;
        self.course_type_repo
            .update(id, name.map(str::trim), description)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course type {id} not found")))
    }

    /// Delete an unused course type.
    pub async fn delete_course_type(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::CourseTypeService, Operation::Delete)
            .await?;
        if !self.course_type_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Course type {id} not found")));
        }
        Ok(())
    }
}

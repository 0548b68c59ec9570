//! UE leaves and their course links.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{CourseRepository, NodeRepository, UeRepository};
use coursehub_entity::course::Course;
use coursehub_entity::node::{CreateUe, Ue};
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Request to update a UE.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateUeRequest {
    /// New name.
    pub name: Option<String>,
    /// New apogee code.
    pub apogee_code: Option<String>,
    /// New parent node, in the same academic year.
    pub parent_id: Option<Uuid>,
}

/// A UE together with its attached courses.
#[derive(Debug, Clone, Serialize)]
pub struct UeWithCourses {
    /// The UE.
    #[serde(flatten)]
    pub ue: Ue,
    /// Attached courses.
    pub courses: Vec<Course>,
}

/// Manages UE leaves.
#[derive(Debug, Clone)]
pub struct UeService {
    ue_repo: Arc<UeRepository>,
    node_repo: Arc<NodeRepository>,
    course_repo: Arc<CourseRepository>,
    checker: Arc<PermissionChecker>,
}

impl UeService {
    /// Creates a new UE service.
    pub fn new(
        ue_repo: Arc<UeRepository>,
        node_repo: Arc<NodeRepository>,
        course_repo: Arc<CourseRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            ue_repo,
            node_repo,
            course_repo,
            checker,
        }
    }

    /// A UE and its courses.
    pub async fn get_ue(&self, ctx: &RequestContext, ue_id: Uuid) -> AppResult<UeWithCourses> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Get)
            .await?;

        let ue = self.find(ue_id).await?;
        let courses = self.ue_repo.find_courses(ue_id).await?;
        Ok(UeWithCourses { ue, courses })
    }

    /// Create a UE under a node. The UE joins the node's academic year.
    pub async fn create_ue(&self, ctx: &RequestContext, req: CreateUe) -> AppResult<Ue> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Create)
            .await?;

        let parent = self
            .node_repo
            .find_by_id(req.parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {} not found", req.parent_id)))?;

        let ue = self.ue_repo.create(&req, parent.academic_year).await?;
        info!(ue_id = %ue.id, parent_id = %parent.id, account_id = %ctx.account_id, "UE created");
        Ok(ue)
    }

    /// Update a UE.
    pub async fn update_ue(
        &self,
        ctx: &RequestContext,
        ue_id: Uuid,
        req: UpdateUeRequest,
    ) -> AppResult<Ue> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Update)
            .await?;

        let ue = self.find(ue_id).await?;
        if let Some(parent_id) = req.parent_id {
            let parent = self
                .node_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Node {parent_id} not found")))?;
            if parent.academic_year != ue.academic_year {
                return Err(AppError::validation(
                    "A UE cannot move to another academic year",
                ));
            }
        }

        self.ue_repo
            .update(
                ue_id,
                req.name.as_deref(),
                req.apogee_code.as_deref(),
                req.parent_id,
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("UE {ue_id} not found")))
    }

    /// Delete a UE.
    pub async fn delete_ue(&self, ctx: &RequestContext, ue_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Delete)
            .await?;

        if !self.ue_repo.delete(ue_id).await? {
            return Err(AppError::not_found(format!("UE {ue_id} not found")));
        }
        info!(ue_id = %ue_id, account_id = %ctx.account_id, "UE deleted");
        Ok(())
    }

    /// Attach a course of the same academic year.
    pub async fn attach_course(
        &self,
        ctx: &RequestContext,
        ue_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Update)
            .await?;

        let ue = self.find(ue_id).await?;
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))?;
        if course.academic_year != ue.academic_year {
            return Err(AppError::validation(
                "Course and UE belong to different academic years",
            ));
        }

        self.ue_repo.attach_course(ue_id, course_id).await
    }

    /// Detach a course.
    pub async fn detach_course(
        &self,
        ctx: &RequestContext,
        ue_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::UeService, Operation::Update)
            .await?;

        if !self.ue_repo.detach_course(ue_id, course_id).await? {
            return Err(AppError::not_found(format!(
                "Course {course_id} is not attached to UE {ue_id}"
            )));
        }
        Ok(())
    }

    async fn find(&self, ue_id: Uuid) -> AppResult<Ue> {
        self.ue_repo
            .find_by_id(ue_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("UE {ue_id} not found")))
    }
}

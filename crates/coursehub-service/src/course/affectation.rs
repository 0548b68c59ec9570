//! Affectations: hours of a course assigned to a profile.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{AffectationRepository, CourseRepository, ProfileRepository};
use coursehub_entity::course::{Affectation, CreateAffectation};
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Manages affectations.
#[derive(Debug, Clone)]
pub struct AffectationService {
    affectation_repo: Arc<AffectationRepository>,
    profile_repo: Arc<ProfileRepository>,
    course_repo: Arc<CourseRepository>,
    checker: Arc<PermissionChecker>,
}

impl AffectationService {
    /// Creates a new affectation service.
    pub fn new(
        affectation_repo: Arc<AffectationRepository>,
        profile_repo: Arc<ProfileRepository>,
        course_repo: Arc<CourseRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            affectation_repo,
            profile_repo,
            course_repo,
            checker,
        }
    }

    /// Affectations of a profile.
    pub async fn list_by_profile(
        &self,
        ctx: &RequestContext,
        profile_id: Uuid,
    ) -> AppResult<Vec<Affectation>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AffectationService, Operation::Get)
            .await?;
        self.affectation_repo.find_by_profile(profile_id).await
    }

    /// Affectations of a course.
    pub async fn list_by_course(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<Vec<Affectation>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AffectationService, Operation::Get)
            .await?;
        self.affectation_repo.find_by_course(course_id).await
    }

    /// Assign course hours to a profile of the same academic year.
    pub async fn create_affectation(
        &self,
        ctx: &RequestContext,
        req: CreateAffectation,
    ) -> AppResult<Affectation> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AffectationService, Operation::Create)
            .await?;

        let profile = self
            .profile_repo
            .find_by_id(req.profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {} not found", req.profile_id)))?;
        let course = self
            .course_repo
            .find_by_id(req.course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", req.course_id)))?;

        if profile.academic_year != course.academic_year {
            return Err(AppError::validation(format!(
                "Profile is in {} but course is in {}",
                profile.academic_year, course.academic_year
            )));
        }

        let affectation = self.affectation_repo.create(&req).await?;
        info!(
            affectation_id = %affectation.id,
            profile_id = %profile.id,
            course_id = %course.id,
            hours = affectation.hours,
            "Affectation created"
        );
        Ok(affectation)
    }

    /// Change the assigned hours.
    pub async fn update_hours(
        &self,
        ctx: &RequestContext,
        affectation_id: Uuid,
        hours: i32,
    ) -> AppResult<Affectation> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AffectationService, Operation::Update)
            .await?;
        self.affectation_repo
            .update_hours(affectation_id, hours)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Affectation {affectation_id} not found")))
    }

    /// Delete an affectation.
    pub async fn delete_affectation(
        &self,
        ctx: &RequestContext,
        affectation_id: Uuid,
    ) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AffectationService, Operation::Delete)
            .await?;
        if !self.affectation_repo.delete(affectation_id).await? {
            return Err(AppError::not_found(format!(
                "Affectation {affectation_id} not found"
            )));
        }
        Ok(())
    }
}

//! Per-year profiles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_database::repositories::{
    AcademicYearRepository, AccountRepository, ProfileRepository,
};
use coursehub_entity::account::{CreateProfile, Profile, UpdateProfile};
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Manages profiles.
///
/// Mail is unique within an academic year and an account has at most one
/// profile per year; both are enforced by the store and surface as conflicts.
#[derive(Debug, Clone)]
pub struct ProfileService {
    profile_repo: Arc<ProfileRepository>,
    account_repo: Arc<AccountRepository>,
    year_repo: Arc<AcademicYearRepository>,
    checker: Arc<PermissionChecker>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        profile_repo: Arc<ProfileRepository>,
        account_repo: Arc<AccountRepository>,
        year_repo: Arc<AcademicYearRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            profile_repo,
            account_repo,
            year_repo,
            checker,
        }
    }

    /// Profiles of an academic year.
    pub async fn list_profiles(
        &self,
        ctx: &RequestContext,
        academic_year: i32,
        page: PageRequest,
    ) -> AppResult<PageResponse<Profile>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Get)
            .await?;
        self.profile_repo
            .find_by_year(academic_year, &page.normalized())
            .await
    }

    /// One profile.
    pub async fn get_profile(&self, ctx: &RequestContext, profile_id: Uuid) -> AppResult<Profile> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Get)
            .await?;
        self.find(profile_id).await
    }

    /// Create a profile, optionally linked to an account.
    pub async fn create_profile(
        &self,
        ctx: &RequestContext,
        req: CreateProfile,
    ) -> AppResult<Profile> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Create)
            .await?;

        if self.year_repo.find_by_year(req.academic_year).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Academic year {} not found",
                req.academic_year
            )));
        }
        if let Some(account_id) = req.account_id {
            self.ensure_linkable(account_id, req.academic_year, None)
                .await?;
        }

        let profile = self.profile_repo.create(&req).await?;
        info!(profile_id = %profile.id, academic_year = profile.academic_year, "Profile created");
        Ok(profile)
    }

    /// Partial update.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        profile_id: Uuid,
        req: UpdateProfile,
    ) -> AppResult<Profile> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Update)
            .await?;

        self.profile_repo
            .update(profile_id, &req)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id} not found")))
    }

    /// Link the profile to `account_id`, or unlink it with `None`.
    pub async fn link_account(
        &self,
        ctx: &RequestContext,
        profile_id: Uuid,
        account_id: Option<Uuid>,
    ) -> AppResult<Profile> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Update)
            .await?;

        let profile = self.find(profile_id).await?;
        if let Some(account_id) = account_id {
            self.ensure_linkable(account_id, profile.academic_year, Some(profile_id))
                .await?;
        }

        let updated = self
            .profile_repo
            .set_account(profile_id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id} not found")))?;
        info!(%profile_id, account_id = ?account_id, "Profile link changed");
        Ok(updated)
    }

    /// Delete a profile (its affectations cascade).
    pub async fn delete_profile(&self, ctx: &RequestContext, profile_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::ProfileService, Operation::Delete)
            .await?;

        if !self.profile_repo.delete(profile_id).await? {
            return Err(AppError::not_found(format!("Profile {profile_id} not found")));
        }
        info!(%profile_id, deleted_by = %ctx.account_id, "Profile deleted");
        Ok(())
    }

    /// The account must exist and have no other profile that year.
    async fn ensure_linkable(
        &self,
        account_id: Uuid,
        academic_year: i32,
        profile_id: Option<Uuid>,
    ) -> AppResult<()> {
        if self.account_repo.find_by_id(account_id).await?.is_none() {
            return Err(AppError::not_found(format!("Account {account_id} not found")));
        }
        match self
            .profile_repo
            .find_by_account(account_id, academic_year)
            .await?
        {
            Some(existing) if Some(existing.id) != profile_id => Err(AppError::conflict(format!(
                "Account {account_id} already has a profile for {academic_year}"
            ))),
            _ => Ok(()),
        }
    }

    async fn find(&self, profile_id: Uuid) -> AppResult<Profile> {
        self.profile_repo
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id} not found")))
    }
}

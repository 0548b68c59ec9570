//! Academic year management.

use std::sync::Arc;

use tracing::info;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::AcademicYearRepository;
use coursehub_entity::academic_year::AcademicYear;
use coursehub_entity::node::Node;
use coursehub_entity::permission::{Operation, ServiceName};

use crate::context::RequestContext;

/// Request to open a new academic year.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateAcademicYearRequest {
    /// Starting calendar year.
    pub year: i32,
    /// Free-form label.
    pub description: Option<String>,
    /// Make it the current year immediately.
    #[serde(default)]
    pub is_current: bool,
}

/// Manages academic years.
#[derive(Debug, Clone)]
pub struct AcademicYearService {
    year_repo: Arc<AcademicYearRepository>,
    checker: Arc<PermissionChecker>,
}

impl AcademicYearService {
    /// Creates a new academic year service.
    pub fn new(year_repo: Arc<AcademicYearRepository>, checker: Arc<PermissionChecker>) -> Self {
        Self { year_repo, checker }
    }

    /// Every academic year, most recent first.
    pub async fn list_years(&self, ctx: &RequestContext) -> AppResult<Vec<AcademicYear>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AcademicYearService, Operation::Get)
            .await?;
        self.year_repo.find_all().await
    }

    /// The current academic year.
    pub async fn get_current(&self, ctx: &RequestContext) -> AppResult<AcademicYear> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AcademicYearService, Operation::Get)
            .await?;
        self.year_repo
            .find_current()
            .await?
            .ok_or_else(|| AppError::not_found("No current academic year"))
    }

    /// Open a year and create its root node.
    pub async fn create_year(
        &self,
        ctx: &RequestContext,
        req: CreateAcademicYearRequest,
    ) -> AppResult<(AcademicYear, Node)> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AcademicYearService, Operation::Create)
            .await?;
        self.open_year(req).await
    }

    /// Year creation without a permission check (admin bootstrap).
    pub async fn open_year(&self, req: CreateAcademicYearRequest) -> AppResult<(AcademicYear, Node)> {
        if !(1900..=9999).contains(&req.year) {
            return Err(AppError::validation(format!(
                "Academic year {} is out of range",
                req.year
            )));
        }

        let (year, root) = self
            .year_repo
            .create_with_root(req.year, req.description.as_deref(), req.is_current)
            .await?;
        info!(year = year.year, root_id = %root.id, is_current = year.is_current, "Academic year created");
        Ok((year, root))
    }

    /// Flag `year` as current.
    pub async fn set_current(&self, ctx: &RequestContext, year: i32) -> AppResult<AcademicYear> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AcademicYearService, Operation::Update)
            .await?;

        let updated = self
            .year_repo
            .set_current(year)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Academic year {year} not found")))?;
        info!(year, changed_by = %ctx.account_id, "Current academic year changed");
        Ok(updated)
    }
}

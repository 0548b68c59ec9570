//! Data access used by the permission checker.

use async_trait::async_trait;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_database::repositories::{
    AcademicYearRepository, AccountMetadataRepository, RoleRepository,
};
use coursehub_entity::permission::{Operation, Permission, ServiceName};

/// The three lookups behind an authorization decision.
#[async_trait]
pub trait PermissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// The academic year flagged as current, if any.
    async fn current_academic_year(&self) -> AppResult<Option<i32>>;

    /// The role an account holds during `academic_year`.
    async fn find_role_for_year(
        &self,
        account_id: Uuid,
        academic_year: i32,
    ) -> AppResult<Option<Uuid>>;

    /// The role's permissions matching `(service, operation)`.
    async fn find_role_permissions(
        &self,
        role_id: Uuid,
        service: ServiceName,
        operation: Operation,
    ) -> AppResult<Vec<Permission>>;
}

/// PostgreSQL-backed [`PermissionStore`].
#[derive(Debug, Clone)]
pub struct PgPermissionStore {
    years: AcademicYearRepository,
    metadata: AccountMetadataRepository,
    roles: RoleRepository,
}

impl PgPermissionStore {
    /// Build the store from its repositories.
    pub fn new(
        years: AcademicYearRepository,
        metadata: AccountMetadataRepository,
        roles: RoleRepository,
    ) -> Self {
        Self {
            years,
            metadata,
            roles,
        }
    }
}

#[async_trait]
impl PermissionStore for PgPermissionStore {
    async fn current_academic_year(&self) -> AppResult<Option<i32>> {
        Ok(self.years.find_current().await?.map(|y| y.year))
    }

    async fn find_role_for_year(
        &self,
        account_id: Uuid,
        academic_year: i32,
    ) -> AppResult<Option<Uuid>> {
        Ok(self
            .metadata
            .find(account_id, academic_year)
            .await?
            .map(|m| m.role_id))
    }

    async fn find_role_permissions(
        &self,
        role_id: Uuid,
        service: ServiceName,
        operation: Operation,
    ) -> AppResult<Vec<Permission>> {
        self.roles
            .find_matching_permissions(role_id, service, operation)
            .await
    }
}

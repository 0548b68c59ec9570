//! Role management and permission listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{PermissionRepository, RoleRepository};
use coursehub_entity::permission::{Operation, Permission, Role, RoleWithPermissions, ServiceName};

use crate::context::RequestContext;

/// Request to create or update a role.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RoleRequest {
    /// Unique name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Manages roles and exposes the permission matrix.
#[derive(Debug, Clone)]
pub struct RoleService {
    role_repo: Arc<RoleRepository>,
    permission_repo: Arc<PermissionRepository>,
    checker: Arc<PermissionChecker>,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(
        role_repo: Arc<RoleRepository>,
        permission_repo: Arc<PermissionRepository>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            role_repo,
            permission_repo,
            checker,
        }
    }

    /// Every role.
    pub async fn list_roles(&self, ctx: &RequestContext) -> AppResult<Vec<Role>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Get)
            .await?;
        self.role_repo.find_all().await
    }

    /// A role with its permissions.
    pub async fn get_role(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
    ) -> AppResult<RoleWithPermissions> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Get)
            .await?;

        let role = self.find(role_id).await?;
        let permissions = self.role_repo.find_permissions(role_id).await?;
        Ok(RoleWithPermissions { role, permissions })
    }

    /// Create a role with no permissions.
    pub async fn create_role(&self, ctx: &RequestContext, req: RoleRequest) -> AppResult<Role> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Create)
            .await?;

        let name = req
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Role name is required"))?;
        if self.role_repo.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!("Role '{name}' already exists")));
        }

        let role = self
            .role_repo
            .create(name, req.description.as_deref())
            .await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Rename a role or change its description.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
        req: RoleRequest,
    ) -> AppResult<Role> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Update)
            .await?;

        if let Some(name) = req.name.as_deref() {
            if let Some(existing) = self.role_repo.find_by_name(name).await? {
                if existing.id != role_id {
                    return Err(AppError::conflict(format!("Role '{name}' already exists")));
                }
            }
        }

        self.role_repo
            .update(role_id, req.name.as_deref(), req.description.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {role_id} not found")))
    }

    /// Delete a role that no account holds.
    pub async fn delete_role(&self, ctx: &RequestContext, role_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Delete)
            .await?;

        if !self.role_repo.delete(role_id).await? {
            return Err(AppError::not_found(format!("Role {role_id} not found")));
        }
        info!(%role_id, deleted_by = %ctx.account_id, "Role deleted");
        Ok(())
    }

    /// Replace the permission set of a role.
    pub async fn set_permissions(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
        permission_ids: Vec<Uuid>,
    ) -> AppResult<RoleWithPermissions> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::RoleService, Operation::Update)
            .await?;

        let role = self.find(role_id).await?;
        let permissions = self
            .role_repo
            .replace_permissions(role_id, &permission_ids)
            .await?;
        info!(%role_id, count = permissions.len(), "Role permissions replaced");
        Ok(RoleWithPermissions { role, permissions })
    }

    /// The full service x operation matrix.
    pub async fn list_permissions(&self, ctx: &RequestContext) -> AppResult<Vec<Permission>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::PermissionService, Operation::Get)
            .await?;
        self.permission_repo.find_all().await
    }

    async fn find(&self, role_id: Uuid) -> AppResult<Role> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {role_id} not found")))
    }
}

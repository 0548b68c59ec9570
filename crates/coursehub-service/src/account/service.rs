//! Account management: CRUD, credentials, and per-year role assignment.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use coursehub_auth::password::{PasswordHasher, PasswordValidator};
use coursehub_auth::PermissionChecker;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_database::repositories::{
    AcademicYearRepository, AccountMetadataRepository, AccountRepository, RoleRepository,
};
use coursehub_entity::account::{Account, CreateAccount};
use coursehub_entity::permission::{AccountMetadata, Operation, ServiceName};

use crate::context::RequestContext;

/// Request to create an account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateAccountRequest {
    /// Unique login.
    pub login: String,
    /// Plaintext password, checked against the password policy.
    pub password: String,
}

/// Request to change an account's login and/or password.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateAccountRequest {
    /// New login.
    pub login: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Handles account management.
#[derive(Debug, Clone)]
pub struct AccountService {
    account_repo: Arc<AccountRepository>,
    metadata_repo: Arc<AccountMetadataRepository>,
    role_repo: Arc<RoleRepository>,
    year_repo: Arc<AcademicYearRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    checker: Arc<PermissionChecker>,
}

impl AccountService {
    /// Creates a new account service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_repo: Arc<AccountRepository>,
        metadata_repo: Arc<AccountMetadataRepository>,
        role_repo: Arc<RoleRepository>,
        year_repo: Arc<AcademicYearRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        checker: Arc<PermissionChecker>,
    ) -> Self {
        Self {
            account_repo,
            metadata_repo,
            role_repo,
            year_repo,
            hasher,
            validator,
            checker,
        }
    }

    /// Lists accounts.
    pub async fn list_accounts(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Account>> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Get)
            .await?;
        self.account_repo.find_all(&page.normalized()).await
    }

    /// Gets one account.
    pub async fn get_account(&self, ctx: &RequestContext, account_id: Uuid) -> AppResult<Account> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Get)
            .await?;
        self.find(account_id).await
    }

    /// The caller's own account. Needs no permission.
    pub async fn get_own_account(&self, ctx: &RequestContext) -> AppResult<Account> {
        self.find(ctx.account_id).await
    }

    /// Creates an account.
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        req: CreateAccountRequest,
    ) -> AppResult<Account> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Create)
            .await?;

        let account = self.register(&req.login, &req.password).await?;
        info!(account_id = %account.id, login = %account.login, created_by = %ctx.account_id, "Account created");
        Ok(account)
    }

    /// Hash and store a new account without a permission check.
    ///
    /// Used by the admin bootstrap CLI, which runs before any account exists.
    pub async fn register(&self, login: &str, password: &str) -> AppResult<Account> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AppError::validation("Login must not be empty"));
        }
        if self.account_repo.find_by_login(login).await?.is_some() {
            return Err(AppError::conflict(format!("Login '{login}' is already taken")));
        }
        self.validator.validate(password, login)?;

        let password_hash = self.hasher.hash_password(password)?;
        self.account_repo
            .create(&CreateAccount {
                login: login.to_string(),
                password_hash,
            })
            .await
    }

    /// Changes login and/or password.
    pub async fn update_account(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        req: UpdateAccountRequest,
    ) -> AppResult<Account> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Update)
            .await?;

        let account = self.find(account_id).await?;

        let login = req.login.as_deref().map(str::trim);
        if let Some(login) = login {
            if login.is_empty() {
                return Err(AppError::validation("Login must not be empty"));
            }
            if let Some(existing) = self.account_repo.find_by_login(login).await? {
                if existing.id != account_id {
                    return Err(AppError::conflict(format!("Login '{login}' is already taken")));
                }
            }
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.validator
                    .validate(password, login.unwrap_or(&account.login))?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let updated = self
            .account_repo
            .update(account_id, login, password_hash.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {account_id} not found")))?;

        info!(account_id = %account_id, updated_by = %ctx.account_id, "Account updated");
        Ok(updated)
    }

    /// Deletes an account. Callers cannot delete themselves.
    pub async fn delete_account(&self, ctx: &RequestContext, account_id: Uuid) -> AppResult<()> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Delete)
            .await?;

        if account_id == ctx.account_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        if !self.account_repo.delete(account_id).await? {
            return Err(AppError::not_found(format!("Account {account_id} not found")));
        }

        info!(account_id = %account_id, deleted_by = %ctx.account_id, "Account deleted");
        Ok(())
    }

    /// Grants `role_id` to an account for `academic_year`, replacing any previous role.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        academic_year: i32,
        role_id: Uuid,
    ) -> AppResult<AccountMetadata> {
        self.checker
            .check_permissions(ctx.account_id, ServiceName::AccountService, Operation::Update)
            .await?;
        self.assign_role(account_id, academic_year, role_id).await
    }

    /// Role assignment without a permission check (admin bootstrap).
    pub async fn assign_role(
        &self,
        account_id: Uuid,
        academic_year: i32,
        role_id: Uuid,
    ) -> AppResult<AccountMetadata> {
        self.find(account_id).await?;
        if self.role_repo.find_by_id(role_id).await?.is_none() {
            return Err(AppError::not_found(format!("Role {role_id} not found")));
        }
        if self.year_repo.find_by_year(academic_year).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Academic year {academic_year} not found"
            )));
        }

        let metadata = self
            .metadata_repo
            .upsert(account_id, academic_year, role_id)
            .await?;
        info!(%account_id, academic_year, %role_id, "Role assigned");
        Ok(metadata)
    }

    async fn find(&self, account_id: Uuid) -> AppResult<Account> {
        self.account_repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {account_id} not found")))
    }
}

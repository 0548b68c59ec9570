//! Account repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_entity::account::{Account, CreateAccount};

use crate::error::{db_error, write_error};

/// Repository for account CRUD and credential lookups.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by id"))
    }

    /// Find an account by login (exact match).
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by login"))
    }

    /// List accounts ordered by login.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Account>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count accounts"))?;

        let accounts = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts ORDER BY login ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list accounts"))?;

        Ok(PageResponse::new(accounts, page, total as u64))
    }

    /// Insert a new account.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (login, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.login)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create account",
            format!("Login '{}' is already taken", data.login),
        ))
    }

    /// Change the login and/or password hash; `None` keeps the stored value.
    pub async fn update(
        &self,
        id: Uuid,
        login: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET login = COALESCE($2, login), \
             password_hash = COALESCE($3, password_hash), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(login)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update account",
            format!("Login '{}' is already taken", login.unwrap_or_default()),
        ))
    }

    /// Delete an account. Returns `false` when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete account"))?;
        Ok(result.rows_affected() > 0)
    }
}

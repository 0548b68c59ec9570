//! Account metadata (per-year role binding) repository.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_entity::permission::AccountMetadata;

use crate::error::{db_error, write_error};

/// Repository for `account_metadata` rows.
#[derive(Debug, Clone)]
pub struct AccountMetadataRepository {
    pool: PgPool,
}

impl AccountMetadataRepository {
    /// Create a new account metadata repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the binding of an account for one academic year.
    pub async fn find(
        &self,
        account_id: Uuid,
        academic_year: i32,
    ) -> AppResult<Option<AccountMetadata>> {
        sqlx::query_as::<_, AccountMetadata>(
            "SELECT * FROM account_metadata WHERE account_id = $1 AND academic_year = $2",
        )
        .bind(account_id)
        .bind(academic_year)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find account metadata"))
    }

    /// Insert or replace the role an account holds for a year.
    pub async fn upsert(
        &self,
        account_id: Uuid,
        academic_year: i32,
        role_id: Uuid,
    ) -> AppResult<AccountMetadata> {
        sqlx::query_as::<_, AccountMetadata>(
            "INSERT INTO account_metadata (account_id, academic_year, role_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (account_id, academic_year) DO UPDATE SET role_id = EXCLUDED.role_id \
             RETURNING *",
        )
        .bind(account_id)
        .bind(academic_year)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to set account role",
            "Unknown account, role or academic year".to_string(),
        ))
    }

    /// Remove the binding for a year.
    pub async fn delete(&self, account_id: Uuid, academic_year: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM account_metadata WHERE account_id = $1 AND academic_year = $2",
        )
        .bind(account_id)
        .bind(academic_year)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to delete account metadata"))?;
        Ok(result.rows_affected() > 0)
    }
}

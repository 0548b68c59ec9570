//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_entity::account::{CreateProfile, Profile, UpdateProfile};

use crate::error::{db_error, write_error};

/// Repository for per-year profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find profile"))
    }

    /// Find the profile linked to an account for a given year.
    pub async fn find_by_account(
        &self,
        account_id: Uuid,
        academic_year: i32,
    ) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE account_id = $1 AND academic_year = $2",
        )
        .bind(account_id)
        .bind(academic_year)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find profile by account"))
    }

    /// List the profiles of an academic year ordered by name.
    pub async fn find_by_year(
        &self,
        academic_year: i32,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Profile>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE academic_year = $1")
                .bind(academic_year)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count profiles"))?;

        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE academic_year = $1 \
             ORDER BY lastname ASC, firstname ASC LIMIT $2 OFFSET $3",
        )
        .bind(academic_year)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list profiles"))?;

        Ok(PageResponse::new(profiles, page, total as u64))
    }

    /// Insert a profile.
    pub async fn create(&self, data: &CreateProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (firstname, lastname, mail, quota, academic_year, account_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.mail)
        .bind(data.quota)
        .bind(data.academic_year)
        .bind(data.account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create profile",
            format!(
                "A profile with mail '{}' or the same account already exists for {}",
                data.mail, data.academic_year
            ),
        ))
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET firstname = COALESCE($2, firstname), \
             lastname = COALESCE($3, lastname), mail = COALESCE($4, mail), \
             quota = COALESCE($5, quota), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.mail)
        .bind(data.quota)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update profile",
            "Mail is already used by another profile this year".to_string(),
        ))
    }

    /// Link the profile to an account, or unlink it with `None`.
    pub async fn set_account(
        &self,
        id: Uuid,
        account_id: Option<Uuid>,
    ) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET account_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to link profile",
            "The account already has a profile this year".to_string(),
        ))
    }

    /// Delete a profile.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete profile"))?;
        Ok(result.rows_affected() > 0)
    }
}

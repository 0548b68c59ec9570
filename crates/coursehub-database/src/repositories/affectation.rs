//! Affectation repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_entity::course::{Affectation, CreateAffectation};

use crate::error::{db_error, write_error};

/// Repository for profile-to-course assignments.
#[derive(Debug, Clone)]
pub struct AffectationRepository {
    pool: PgPool,
}

impl AffectationRepository {
    /// Create a new affectation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an affectation by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Affectation>> {
        sqlx::query_as::<_, Affectation>("SELECT * FROM affectations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find affectation"))
    }

    /// Affectations of a profile.
    pub async fn find_by_profile(&self, profile_id: Uuid) -> AppResult<Vec<Affectation>> {
        sqlx::query_as::<_, Affectation>(
            "SELECT * FROM affectations WHERE profile_id = $1 ORDER BY id ASC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list affectations of profile"))
    }

    /// Affectations of a course.
    pub async fn find_by_course(&self, course_id: Uuid) -> AppResult<Vec<Affectation>> {
        sqlx::query_as::<_, Affectation>(
            "SELECT * FROM affectations WHERE course_id = $1 ORDER BY id ASC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list affectations of course"))
    }

    /// Insert an affectation.
    pub async fn create(&self, data: &CreateAffectation) -> AppResult<Affectation> {
        sqlx::query_as::<_, Affectation>(
            "INSERT INTO affectations (profile_id, course_id, hours) VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(data.profile_id)
        .bind(data.course_id)
        .bind(data.hours)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create affectation",
            "Unknown profile or course".to_string(),
        ))
    }

    /// Change the assigned hours.
    pub async fn update_hours(&self, id: Uuid, hours: i32) -> AppResult<Option<Affectation>> {
        sqlx::query_as::<_, Affectation>(
            "UPDATE affectations SET hours = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hours)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update affectation"))
    }

    /// Delete an affectation.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM affectations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete affectation"))?;
        Ok(result.rows_affected() > 0)
    }
}

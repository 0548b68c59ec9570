//! Course type repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_entity::course::CourseType;

use crate::error::{db_error, write_error};

/// Repository for course types.
#[derive(Debug, Clone)]
pub struct CourseTypeRepository {
    pool: PgPool,
}

impl CourseTypeRepository {
    /// Create a new course type repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List course types ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<CourseType>> {
        sqlx::query_as::<_, CourseType>("SELECT * FROM course_types ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list course types"))
    }

    /// Find a course type by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CourseType>> {
        sqlx::query_as::<_, CourseType>("SELECT * FROM course_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find course type"))
    }

    /// Insert a course type.
    pub async fn create(&self, name: &str, description: Option<&str>) -> AppResult<CourseType> {
        sqlx::query_as::<_, CourseType>(
            "INSERT INTO course_types (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create course type",
            format!("Course type '{name}' already exists"),
        ))
    }

    /// Update name or description.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Option<CourseType>> {
        sqlx::query_as::<_, CourseType>(
            "UPDATE course_types SET name = COALESCE($2, name), \
             description = COALESCE($3, description) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update course type",
            format!("Course type '{}' already exists", name.unwrap_or_default()),
        ))
    }

    /// Delete a course type. Fails with a conflict while courses use it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM course_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_error(
                "Failed to delete course type",
                "Course type is still used by courses".to_string(),
            ))?;
        Ok(result.rows_affected() > 0)
    }
}

//! UE repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_entity::course::Course;
use coursehub_entity::node::{CreateUe, Ue};

use crate::error::{db_error, write_error};

/// Repository for UE leaves and their course associations.
#[derive(Debug, Clone)]
pub struct UeRepository {
    pool: PgPool,
}

impl UeRepository {
    /// Create a new UE repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a UE by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ue>> {
        sqlx::query_as::<_, Ue>("SELECT * FROM ues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find UE"))
    }

    /// Every UE of an academic year in one query.
    pub async fn find_by_year(&self, academic_year: i32) -> AppResult<Vec<Ue>> {
        sqlx::query_as::<_, Ue>("SELECT * FROM ues WHERE academic_year = $1 ORDER BY name ASC")
            .bind(academic_year)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list UEs of year"))
    }

    /// The UEs attached directly to a node.
    pub async fn find_by_parent(&self, parent_id: Uuid) -> AppResult<Vec<Ue>> {
        sqlx::query_as::<_, Ue>("SELECT * FROM ues WHERE parent_id = $1 ORDER BY name ASC")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list UEs of node"))
    }

    /// Insert a UE in the given academic year.
    pub async fn create(&self, data: &CreateUe, academic_year: i32) -> AppResult<Ue> {
        sqlx::query_as::<_, Ue>(
            "INSERT INTO ues (name, apogee_code, parent_id, academic_year) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.apogee_code)
        .bind(data.parent_id)
        .bind(academic_year)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create UE",
            format!("Parent node {} does not exist", data.parent_id),
        ))
    }

    /// Update name, apogee code or parent; `None` keeps the stored value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        apogee_code: Option<&str>,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<Ue>> {
        sqlx::query_as::<_, Ue>(
            "UPDATE ues SET name = COALESCE($2, name), \
             apogee_code = COALESCE($3, apogee_code), parent_id = COALESCE($4, parent_id) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(apogee_code)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update UE"))
    }

    /// Delete a UE (its course links cascade).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete UE"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Courses attached to a UE.
    pub async fn find_courses(&self, ue_id: Uuid) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT c.* FROM courses c INNER JOIN ue_courses uc ON uc.course_id = c.id \
             WHERE uc.ue_id = $1 ORDER BY c.name ASC",
        )
        .bind(ue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list UE courses"))
    }

    /// Attach a course. Attaching twice is a no-op.
    pub async fn attach_course(&self, ue_id: Uuid, course_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO ue_courses (ue_id, course_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(ue_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(write_error(
            "Failed to attach course",
            "Unknown UE or course".to_string(),
        ))?;
        Ok(())
    }

    /// Detach a course. Returns `false` if it was not attached.
    pub async fn detach_course(&self, ue_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ue_courses WHERE ue_id = $1 AND course_id = $2")
            .bind(ue_id)
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to detach course"))?;
        Ok(result.rows_affected() > 0)
    }
}

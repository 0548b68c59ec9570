//! Course repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_core::types::pagination::{PageRequest, PageResponse};
use coursehub_entity::course::{Course, CreateCourse};

use crate::error::{db_error, write_error};

/// Repository for courses.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find course"))
    }

    /// List the courses of an academic year.
    pub async fn find_by_year(
        &self,
        academic_year: i32,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Course>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE academic_year = $1")
                .bind(academic_year)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count courses"))?;

        let courses = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE academic_year = $1 ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(academic_year)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list courses"))?;

        Ok(PageResponse::new(courses, page, total as u64))
    }

    /// Insert a course.
    pub async fn create(&self, data: &CreateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, hours, course_type_id, academic_year) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.hours)
        .bind(data.course_type_id)
        .bind(data.academic_year)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create course",
            "Unknown course type or academic year".to_string(),
        ))
    }

    /// Update name, hours or type; `None` keeps the stored value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        hours: Option<i32>,
        course_type_id: Option<Uuid>,
    ) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET name = COALESCE($2, name), hours = COALESCE($3, hours), \
             course_type_id = COALESCE($4, course_type_id) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(hours)
        .bind(course_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update course",
            "Unknown course type".to_string(),
        ))
    }

    /// Delete a course (UE links and affectations cascade).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete course"))?;
        Ok(result.rows_affected() > 0)
    }
}

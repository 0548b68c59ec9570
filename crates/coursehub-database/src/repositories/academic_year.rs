//! Academic year repository implementation.

use sqlx::PgPool;

use coursehub_core::result::AppResult;
use coursehub_entity::academic_year::AcademicYear;
use coursehub_entity::node::Node;

use crate::error::{db_error, write_error};

/// Repository for academic years and their root nodes.
#[derive(Debug, Clone)]
pub struct AcademicYearRepository {
    pool: PgPool,
}

impl AcademicYearRepository {
    /// Create a new academic year repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every academic year, most recent first.
    pub async fn find_all(&self) -> AppResult<Vec<AcademicYear>> {
        sqlx::query_as::<_, AcademicYear>("SELECT * FROM academic_years ORDER BY year DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list academic years"))
    }

    /// Find an academic year by its starting calendar year.
    pub async fn find_by_year(&self, year: i32) -> AppResult<Option<AcademicYear>> {
        sqlx::query_as::<_, AcademicYear>("SELECT * FROM academic_years WHERE year = $1")
            .bind(year)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find academic year"))
    }

    /// Find the year flagged as current.
    pub async fn find_current(&self) -> AppResult<Option<AcademicYear>> {
        sqlx::query_as::<_, AcademicYear>("SELECT * FROM academic_years WHERE is_current")
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find current academic year"))
    }

    /// Insert an academic year together with its root node in one transaction.
    ///
    /// When `make_current` is set, the previous current year is cleared first.
    pub async fn create_with_root(
        &self,
        year: i32,
        description: Option<&str>,
        make_current: bool,
    ) -> AppResult<(AcademicYear, Node)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if make_current {
            sqlx::query("UPDATE academic_years SET is_current = FALSE WHERE is_current")
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to clear current academic year"))?;
        }

        let academic_year = sqlx::query_as::<_, AcademicYear>(
            "INSERT INTO academic_years (year, description, is_current) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(year)
        .bind(description)
        .bind(make_current)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error(
            "Failed to create academic year",
            format!("Academic year {year} already exists"),
        ))?;

        let root = sqlx::query_as::<_, Node>(
            "INSERT INTO nodes (name, parent_id, academic_year) VALUES ($1, NULL, $2) RETURNING *",
        )
        .bind(academic_year.label())
        .bind(year)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create root node"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit academic year"))?;

        Ok((academic_year, root))
    }

    /// Flag `year` as the single current academic year.
    pub async fn set_current(&self, year: i32) -> AppResult<Option<AcademicYear>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("UPDATE academic_years SET is_current = FALSE WHERE is_current AND year <> $1")
            .bind(year)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to clear current academic year"))?;

        let updated = sqlx::query_as::<_, AcademicYear>(
            "UPDATE academic_years SET is_current = TRUE WHERE year = $1 RETURNING *",
        )
        .bind(year)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to set current academic year"))?;

        if updated.is_some() {
            tx.commit()
                .await
                .map_err(db_error("Failed to commit current academic year"))?;
        }
        Ok(updated)
    }
}

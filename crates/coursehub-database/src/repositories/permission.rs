//! Permission repository implementation.

use sqlx::PgPool;

use coursehub_core::result::AppResult;
use coursehub_entity::permission::Permission;

use crate::error::db_error;

/// Read access to the seeded permission matrix.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every permission ordered by service then operation.
    pub async fn find_all(&self) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions ORDER BY service ASC, operation ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list permissions"))
    }
}

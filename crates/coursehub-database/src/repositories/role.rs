//! Role repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_entity::permission::{Operation, Permission, Role, ServiceName};

use crate::error::{db_error, write_error};

/// Repository for roles and their permission sets.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every role ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list roles"))
    }

    /// Find a role by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find role"))
    }

    /// Find a role by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find role by name"))
    }

    /// Every permission attached to a role.
    pub async fn find_permissions(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT p.* FROM permissions p \
             INNER JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role_id = $1 ORDER BY p.service ASC, p.operation ASC",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list role permissions"))
    }

    /// The role's permissions filtered to one `(service, operation)` pair.
    pub async fn find_matching_permissions(
        &self,
        role_id: Uuid,
        service: ServiceName,
        operation: Operation,
    ) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT p.* FROM permissions p \
             INNER JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role_id = $1 AND p.service = $2 AND p.operation = $3",
        )
        .bind(role_id)
        .bind(service)
        .bind(operation)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to filter role permissions"))
    }

    /// Insert a role.
    pub async fn create(&self, name: &str, description: Option<&str>) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create role",
            format!("Role '{name}' already exists"),
        ))
    }

    /// Rename a role or change its description.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = COALESCE($2, name), \
             description = COALESCE($3, description) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update role",
            format!("Role '{}' already exists", name.unwrap_or_default()),
        ))
    }

    /// Delete a role. Fails with a conflict while accounts still hold it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_error(
                "Failed to delete role",
                "Role is still assigned to accounts".to_string(),
            ))?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the whole permission set of a role atomically.
    pub async fn replace_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<Vec<Permission>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to clear role permissions"))?;

        let inserted = sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             SELECT $1, p.id FROM permissions p WHERE p.id = ANY($2)",
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to attach role permissions"))?;

        let mut unique = permission_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if inserted.rows_affected() != unique.len() as u64 {
            return Err(AppError::validation("Unknown permission id in set"));
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit role permissions"))?;

        self.find_permissions(role_id).await
    }
}

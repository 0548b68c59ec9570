//! Node repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_entity::node::{CreateNode, Node};

use crate::error::{db_error, write_error};

/// Repository for the teaching hierarchy's folder nodes.
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: PgPool,
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find node"))
    }

    /// Every node of an academic year in one query.
    pub async fn find_by_year(&self, academic_year: i32) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE academic_year = $1 ORDER BY created_at ASC, name ASC",
        )
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list nodes of year"))
    }

    /// The root node of an academic year.
    pub async fn find_root(&self, academic_year: i32) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE academic_year = $1 AND parent_id IS NULL",
        )
        .bind(academic_year)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find root node"))
    }

    /// IDs of the immediate child nodes.
    pub async fn find_child_ids(&self, parent_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar(
            "SELECT id FROM nodes WHERE parent_id = $1 ORDER BY created_at ASC, name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list child nodes"))
    }

    /// Insert a node.
    pub async fn create(&self, data: &CreateNode) -> AppResult<Node> {
        sqlx::query_as::<_, Node>(
            "INSERT INTO nodes (name, parent_id, academic_year) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.academic_year)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create node",
            format!("Academic year {} already has a root node", data.academic_year),
        ))
    }

    /// Rename and/or move a node; `None` keeps the stored value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>(
            "UPDATE nodes SET name = COALESCE($2, name), parent_id = COALESCE($3, parent_id) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update node"))
    }

    /// Delete a node. Fails with a conflict if rows still reference it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_error(
                "Failed to delete node",
                format!("Node {id} still has children"),
            ))?;
        Ok(result.rows_affected() > 0)
    }
}

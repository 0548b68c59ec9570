//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in the per-year teaching hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Node {
    /// Unique node identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Parent node (null only for the root of a year).
    pub parent_id: Option<Uuid>,
    /// Academic year the node belongs to.
    pub academic_year: i32,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Check if this is the root of its academic year.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNode {
    /// Display name.
    pub name: String,
    /// Parent node; `None` only when creating a year's root.
    pub parent_id: Option<Uuid>,
    /// Academic year.
    pub academic_year: i32,
}

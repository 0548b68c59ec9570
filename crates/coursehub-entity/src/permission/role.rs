//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::model::Permission;

/// A named permission bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name (natural key).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A role together with its resolved permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    /// The role row.
    #[serde(flatten)]
    pub role: Role,
    /// Permissions granted by the role.
    pub permissions: Vec<Permission>,
}

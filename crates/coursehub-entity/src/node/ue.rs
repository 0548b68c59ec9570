//! UE (teaching unit) entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A leaf of the teaching hierarchy, carrying course associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ue {
    /// Unique UE identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Apogee code.
    pub apogee_code: Option<String>,
    /// Parent node.
    pub parent_id: Uuid,
    /// Academic year, always equal to the parent's.
    pub academic_year: i32,
}

/// Data required to create a UE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUe {
    /// Display name.
    pub name: String,
    /// Apogee code.
    pub apogee_code: Option<String>,
    /// Parent node.
    pub parent_id: Uuid,
}

//! Operation identifiers used as the second half of a permission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action performed against a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "operation_kind")]
pub enum Operation {
    /// Read access.
    Get,
    /// Creation.
    Create,
    /// Modification.
    Update,
    /// Removal.
    Delete,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 4] = [Self::Get, Self::Create, Self::Update, Self::Delete];

    /// Return the operation identifier as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = coursehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                coursehub_core::AppError::validation(format!(
                    "Invalid operation: '{s}'. Expected one of: Get, Create, Update, Delete"
                ))
            })
    }
}

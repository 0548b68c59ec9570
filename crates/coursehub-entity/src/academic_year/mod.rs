//! Academic year entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An academic year, keyed by its starting calendar year (2024 for 2024-2025).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AcademicYear {
    /// Starting calendar year.
    pub year: i32,
    /// Free-form label.
    pub description: Option<String>,
    /// Whether this is the year used for authorization checks.
    pub is_current: bool,
}

impl AcademicYear {
    /// Display label such as `2024-2025`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.year, self.year + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let year = AcademicYear {
            year: 2024,
            description: None,
            is_current: true,
        };
        assert_eq!(year.label(), "2024-2025");
    }
}

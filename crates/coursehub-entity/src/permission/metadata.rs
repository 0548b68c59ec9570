//! Per-year account/role binding.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Binds an account to a role for one academic year.
///
/// This row is the effective authorization record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccountMetadata {
    /// The account.
    pub account_id: Uuid,
    /// The academic year the binding applies to.
    pub academic_year: i32,
    /// The role held during that year.
    pub role_id: Uuid,
}

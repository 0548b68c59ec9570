//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A personal record for one academic year, optionally linked to an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Mail address, unique within the academic year.
    pub mail: String,
    /// Teaching quota in hours.
    pub quota: i32,
    /// Academic year this profile belongs to.
    pub academic_year: i32,
    /// Linked account (at most one profile per account per year).
    pub account_id: Option<Uuid>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Mail address.
    pub mail: String,
    /// Teaching quota in hours.
    pub quota: i32,
    /// Academic year.
    pub academic_year: i32,
    /// Optional account link.
    pub account_id: Option<Uuid>,
}

/// Partial update of a profile; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New first name.
    pub firstname: Option<String>,
    /// New last name.
    pub lastname: Option<String>,
    /// New mail address.
    pub mail: Option<String>,
    /// New quota.
    pub quota: Option<i32>,
}

//! Affectation (profile-to-course assignment) entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hours of a course assigned to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Affectation {
    /// Unique identifier.
    pub id: Uuid,
    /// Assigned profile.
    pub profile_id: Uuid,
    /// Assigned course.
    pub course_id: Uuid,
    /// Assigned hours.
    pub hours: i32,
}

/// Data required to create an affectation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAffectation {
    /// Assigned profile.
    pub profile_id: Uuid,
    /// Assigned course.
    pub course_id: Uuid,
    /// Assigned hours.
    pub hours: i32,
}

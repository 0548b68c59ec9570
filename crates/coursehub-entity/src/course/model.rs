//! Course and course type entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A kind of course (lecture, tutorial, lab...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseType {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A course given during one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique identifier.
    pub id: Uuid,
    /// Course name.
    pub name: String,
    /// Scheduled hours.
    pub hours: i32,
    /// Course type.
    pub course_type_id: Uuid,
    /// Academic year.
    pub academic_year: i32,
}

/// Data required to create a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Course name.
    pub name: String,
    /// Scheduled hours.
    pub hours: i32,
    /// Course type.
    pub course_type_id: Uuid,
    /// Academic year.
    pub academic_year: i32,
}

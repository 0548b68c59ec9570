//! Course catalogue and assignment entities.

pub mod affectation;
pub mod model;

pub use affectation::{Affectation, CreateAffectation};
pub use model::{Course, CourseType, CreateCourse};

//! Course catalogue and assignments.

pub mod affectation;
pub mod course_type;
pub mod service;

pub use affectation::AffectationService;
pub use course_type::CourseTypeService;
pub use service::CourseService;

//! Academic years.

pub mod service;

pub use service::AcademicYearService;

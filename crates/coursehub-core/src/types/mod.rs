//! Core type definitions used across the CourseHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};

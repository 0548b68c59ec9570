//! # coursehub-entity
//!
//! Domain entity models for CourseHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod academic_year;
pub mod account;
pub mod course;
pub mod node;
pub mod permission;

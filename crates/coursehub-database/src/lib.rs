//! # coursehub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all CourseHub entities.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

//! # coursehub-api
//!
//! HTTP API layer for CourseHub built on Axum.
//!
//! Every protected route authenticates the bearer token through the
//! [`extractors::CurrentAccount`] extractor and hands the resulting
//! request context to a permission-gated service.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

//! Request handlers grouped by resource.

pub mod academic_year;
pub mod account;
pub mod affectation;
pub mod auth;
pub mod course;
pub mod health;
pub mod node;
pub mod profile;
pub mod role;
pub mod ue;

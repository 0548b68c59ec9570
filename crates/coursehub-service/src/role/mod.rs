//! Roles and the permission matrix.

pub mod service;

pub use service::RoleService;

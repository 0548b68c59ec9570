//! Role-based authorization entities.

pub mod metadata;
pub mod model;
pub mod operation;
pub mod role;
pub mod service;

pub use metadata::AccountMetadata;
pub use model::Permission;
pub use operation::Operation;
pub use role::{Role, RoleWithPermissions};
pub use service::ServiceName;

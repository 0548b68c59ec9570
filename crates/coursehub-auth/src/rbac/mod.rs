//! Role-based permission checks over `(account, service, operation)`.

pub mod checker;
pub mod store;

pub use checker::PermissionChecker;
pub use store::{PermissionStore, PgPermissionStore};

//! # coursehub-auth
//!
//! Authentication and authorization for CourseHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and password policy
//! - `token`: access/refresh token issuance, validation, and revocation
//! - `rbac`: `(account, service, operation)` permission checks

pub mod password;
pub mod rbac;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{PermissionChecker, PermissionStore, PgPermissionStore};
pub use token::{SessionTokens, TokenEngine, TokenKind, TokenPayload, TokenService};

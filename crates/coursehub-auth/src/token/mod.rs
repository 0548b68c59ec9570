//! Access/refresh token issuance, validation, and revocation.

pub mod engine;
pub mod kind;
pub mod payload;
pub mod service;

pub use engine::TokenEngine;
pub use kind::TokenKind;
pub use payload::TokenPayload;
pub use service::{SessionTokens, TokenService};

//! Login, logout, and token refresh.

pub mod service;

pub use service::SessionService;

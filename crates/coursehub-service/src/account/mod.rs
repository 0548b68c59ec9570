//! Accounts and per-year profiles.

pub mod profile;
pub mod service;

pub use profile::ProfileService;
pub use service::AccountService;

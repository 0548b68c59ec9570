//! # coursehub-cache
//!
//! Key/value stores with per-key expiry backing the token revocation
//! list. Two providers are available:
//!
//! - **memory**: in-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: shared cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime from configuration.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;

//! Redis connection management.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use coursehub_core::config::cache::RedisCacheConfig;
use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;

/// Reconnecting Redis connection plus the namespace applied to every key.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Open a connection manager against `config.url`.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(url = %redact_url(&config.url), "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!("Connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// A cheap clone of the connection manager for one command.
    pub fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Namespace a key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}

fn redact_url(url: &str) -> String {
    match (url.split_once("://"), url.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://****@{host}"),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_hides_credentials() {
        assert_eq!(
            redact_url("redis://:hunter2@cache:6379/0"),
            "redis://****@cache:6379/0"
        );
        assert_eq!(redact_url("redis://cache:6379"), "redis://cache:6379");
    }
}

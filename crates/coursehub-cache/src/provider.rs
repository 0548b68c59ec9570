//! Cache manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use coursehub_core::config::CacheConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::cache::CacheProvider;

/// Owns the provider chosen at startup and forwards every call to it.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Build the provider named by `config.provider`.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis cache provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    max_capacity = config.memory.max_capacity,
                    "Initializing in-memory cache provider"
                );
                Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an existing provider (used by tests and the CLI).
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.set_nx(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use coursehub_core::config::cache::MemoryCacheConfig;

    #[tokio::test]
    async fn test_unknown_provider_is_configuration_error() {
        let config = CacheConfig {
            provider: "memcached".to_string(),
            ..CacheConfig::default()
        };
        let err = CacheManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, coursehub_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_manager_forwards_to_provider() {
        let provider = crate::memory::MemoryCacheProvider::new(&MemoryCacheConfig::default());
        let manager = CacheManager::from_provider(Arc::new(provider));
        manager
            .set("k", "v", Duration::from_secs(30))
            .await
            .unwrap();
        assert!(manager.exists("k").await.unwrap());
        assert_eq!(manager.get("k").await.unwrap().as_deref(), Some("v"));
    }
}

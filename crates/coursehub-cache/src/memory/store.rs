//! In-memory cache implementation using moka.
//!
//! Entries carry their own TTL; moka evicts each one when it elapses.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use coursehub_core::config::cache::MemoryCacheConfig;
use coursehub_core::result::AppResult;
use coursehub_core::traits::cache::CacheProvider;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _now: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _now: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Single-node cache provider backed by moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a cache bounded to `config.max_capacity` entries.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        // or_insert is atomic per key: only the first writer sees a fresh entry.
        let stored = self.cache.entry(key.to_string()).or_insert(entry).await;
        Ok(stored.is_fresh())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 })
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        assert_eq!(provider.get("key2").await.unwrap(), None);
        assert!(!provider.exists("key2").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_nx_keeps_first_value() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "access", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "refresh", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
        assert_eq!(
            provider.get("nx_key").await.unwrap().as_deref(),
            Some("access")
        );
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_own_ttl() {
        let provider = make_provider();
        provider
            .set("short", "v", Duration::from_millis(50))
            .await
            .unwrap();
        provider
            .set("long", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!provider.exists("short").await.unwrap());
        assert_eq!(provider.get("short").await.unwrap(), None);
        assert!(provider.exists("long").await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(make_provider().health_check().await.unwrap());
    }
}

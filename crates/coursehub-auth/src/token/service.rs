//! Token pair orchestration: login, logout, and refresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use coursehub_cache::CacheManager;
use coursehub_core::config::AuthConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;

use super::engine::TokenEngine;
use super::kind::TokenKind;
use super::payload::TokenPayload;

/// An access/refresh token pair as held by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Token exchanged for a new pair.
    pub refresh_token: String,
}

impl SessionTokens {
    /// Forget both tokens.
    pub fn clear(&mut self) {
        self.access_token.clear();
        self.refresh_token.clear();
    }
}

/// Owns one engine per token kind.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: TokenEngine,
    refresh: TokenEngine,
}

impl TokenService {
    /// Assemble a service from two engines.
    pub fn new(access: TokenEngine, refresh: TokenEngine) -> Self {
        Self { access, refresh }
    }

    /// Build both engines from configuration, sharing one revocation cache.
    pub fn from_config(config: &AuthConfig, cache: Arc<CacheManager>) -> AppResult<Self> {
        Ok(Self {
            access: TokenEngine::from_config(TokenKind::Access, config, cache.clone())?,
            refresh: TokenEngine::from_config(TokenKind::Refresh, config, cache)?,
        })
    }

    /// The access token engine.
    pub fn access(&self) -> &TokenEngine {
        &self.access
    }

    /// The refresh token engine.
    pub fn refresh(&self) -> &TokenEngine {
        &self.refresh
    }

    /// Validate a bearer access token.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<TokenPayload> {
        self.access.extract_payload(access_token).await
    }

    /// Issue a fresh pair for `account_id`.
    pub fn generate_tokens(&self, account_id: Uuid) -> AppResult<SessionTokens> {
        Ok(SessionTokens {
            access_token: self.access.generate(account_id)?,
            refresh_token: self.refresh.generate(account_id)?,
        })
    }

    /// Revoke both tokens and clear them. Cache failures are returned.
    pub async fn revoke_tokens(&self, tokens: &mut SessionTokens) -> AppResult<()> {
        self.access.revoke(&tokens.access_token).await?;
        self.refresh.revoke(&tokens.refresh_token).await?;
        tokens.clear();
        Ok(())
    }

    /// Exchange a pair for a new one, revoking the old pair.
    ///
    /// The refresh token is consumed with a set-if-absent write, so of two
    /// concurrent exchanges of the same pair only one issues new tokens.
    pub async fn refresh_tokens(&self, tokens: &mut SessionTokens) -> AppResult<SessionTokens> {
        if tokens.refresh_token.is_empty() {
            return Err(AppError::authentication("Could not validate credentials"));
        }

        let payload = self.refresh.extract_payload(&tokens.refresh_token).await?;
        self.access.revoke(&tokens.access_token).await?;
        if !self.refresh.revoke(&tokens.refresh_token).await? {
            warn!(account_id = %payload.account_id, "Refresh token reused");
            return Err(AppError::token_revoked("The refresh token has been revoked"));
        }
        tokens.clear();
        let fresh = self.generate_tokens(payload.account_id)?;

        info!(account_id = %payload.account_id, "Token pair refreshed");
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_cache::memory::MemoryCacheProvider;
    use coursehub_core::config::cache::MemoryCacheConfig;
    use coursehub_core::error::ErrorKind;
    use coursehub_core::traits::CacheProvider;

    fn config() -> AuthConfig {
        AuthConfig {
            access_secret: "access-secret".to_string(),
            refresh_secret: "refresh-secret".to_string(),
            algorithm: "HS384".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_minutes: 60 * 24,
            password_min_length: 8,
        }
    }

    fn service() -> (TokenService, Arc<CacheManager>) {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig::default());
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        (TokenService::from_config(&config(), cache.clone()).unwrap(), cache)
    }

    #[tokio::test]
    async fn test_generate_tokens_issues_distinct_kinds() {
        let (service, _) = service();
        let account_id = Uuid::new_v4();
        let tokens = service.generate_tokens(account_id).unwrap();

        assert_ne!(tokens.access_token, tokens.refresh_token);
        let access = service.authenticate(&tokens.access_token).await.unwrap();
        assert_eq!(access.account_id, account_id);
        let refresh = service
            .refresh()
            .extract_payload(&tokens.refresh_token)
            .await
            .unwrap();
        assert_eq!(refresh.account_id, account_id);
        assert!(service.authenticate(&tokens.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_revokes_exactly_the_old_pair() {
        let (service, cache) = service();
        let account_id = Uuid::new_v4();
        let original = service.generate_tokens(account_id).unwrap();
        let mut held = original.clone();

        let fresh = service.refresh_tokens(&mut held).await.unwrap();

        assert_eq!(held, SessionTokens::default());
        assert_eq!(
            cache.get(&original.access_token).await.unwrap().as_deref(),
            Some("access")
        );
        assert_eq!(
            cache.get(&original.refresh_token).await.unwrap().as_deref(),
            Some("refresh")
        );
        assert!(!cache.exists(&fresh.access_token).await.unwrap());
        assert!(!cache.exists(&fresh.refresh_token).await.unwrap());

        assert_ne!(fresh.access_token, original.access_token);
        assert_ne!(fresh.access_token, original.refresh_token);
        assert_ne!(fresh.refresh_token, original.access_token);
        assert_ne!(fresh.refresh_token, original.refresh_token);

        let payload = service.authenticate(&fresh.access_token).await.unwrap();
        assert_eq!(payload.account_id, account_id);
    }

    #[tokio::test]
    async fn test_refresh_with_revoked_token_fails() {
        let (service, _) = service();
        let original = service.generate_tokens(Uuid::new_v4()).unwrap();
        let mut first = original.clone();
        service.refresh_tokens(&mut first).await.unwrap();

        let mut replay = original;
        let err = service.refresh_tokens(&mut replay).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenRevoked);
    }

    /// Yields to the scheduler before every cache round trip so that two
    /// in-flight refreshes interleave.
    #[derive(Debug)]
    struct YieldingCache(MemoryCacheProvider);

    #[async_trait::async_trait]
    impl CacheProvider for YieldingCache {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            tokio::task::yield_now().await;
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str, ttl: std::time::Duration) -> AppResult<()> {
            tokio::task::yield_now().await;
            self.0.set(key, value, ttl).await
        }

        async fn set_nx(
            &self,
            key: &str,
            value: &str,
            ttl: std::time::Duration,
        ) -> AppResult<bool> {
            tokio::task::yield_now().await;
            self.0.set_nx(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.0.delete(key).await
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            tokio::task::yield_now().await;
            self.0.exists(key).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.0.health_check().await
        }
    }

    #[tokio::test]
    async fn test_concurrent_refresh_issues_one_pair() {
        let provider = YieldingCache(MemoryCacheProvider::new(&MemoryCacheConfig::default()));
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let service = TokenService::from_config(&config(), cache).unwrap();
        let original = service.generate_tokens(Uuid::new_v4()).unwrap();
        let mut first = original.clone();
        let mut second = original.clone();

        let (a, b) = tokio::join!(
            service.refresh_tokens(&mut first),
            service.refresh_tokens(&mut second)
        );

        let (winner, loser) = match (a, b) {
            (Ok(pair), Err(err)) | (Err(err), Ok(pair)) => (pair, err),
            (a, b) => panic!("expected exactly one success, got {a:?} and {b:?}"),
        };
        assert_eq!(loser.kind, ErrorKind::TokenRevoked);
        assert!(service.authenticate(&winner.access_token).await.is_ok());
        assert!(
            service
                .refresh()
                .is_revoked(&original.refresh_token)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_fails() {
        let (service, _) = service();
        let mut tokens = SessionTokens {
            access_token: service.access().generate(Uuid::new_v4()).unwrap(),
            refresh_token: String::new(),
        };
        let err = service.refresh_tokens(&mut tokens).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Could not validate credentials");
    }

    #[tokio::test]
    async fn test_logout_revokes_both() {
        let (service, _) = service();
        let tokens = service.generate_tokens(Uuid::new_v4()).unwrap();
        let mut held = tokens.clone();

        service.revoke_tokens(&mut held).await.unwrap();

        assert!(held.access_token.is_empty() && held.refresh_token.is_empty());
        assert_eq!(
            service.authenticate(&tokens.access_token).await.unwrap_err().kind,
            ErrorKind::TokenRevoked
        );
        assert!(service.refresh().is_revoked(&tokens.refresh_token).await.unwrap());
    }
}

//! Token engine: one per token kind.

use std::str::FromStr;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, warn};
use uuid::Uuid;

use coursehub_cache::CacheManager;
use coursehub_core::config::AuthConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::CacheProvider;

use super::kind::TokenKind;
use super::payload::TokenPayload;

/// Issues, validates, and revokes tokens of a single kind.
///
/// Revoked tokens are stored verbatim as keys of the revocation cache,
/// with the token kind as value.
#[derive(Clone)]
pub struct TokenEngine {
    kind: TokenKind,
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: chrono::Duration,
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for TokenEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEngine")
            .field("kind", &self.kind)
            .field("algorithm", &self.header.alg)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenEngine {
    /// Create an engine from an explicit secret, algorithm name, and lifetime.
    pub fn new(
        kind: TokenKind,
        secret: &str,
        algorithm: &str,
        lifetime: chrono::Duration,
        cache: Arc<CacheManager>,
    ) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::configuration(format!(
                "Missing signing secret for {kind} tokens"
            )));
        }

        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => {
                return Err(AppError::configuration(format!(
                    "Unsupported signing algorithm '{algorithm}'"
                )));
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            kind,
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
            cache,
        })
    }

    /// Create the engine for `kind` from auth configuration.
    pub fn from_config(
        kind: TokenKind,
        config: &AuthConfig,
        cache: Arc<CacheManager>,
    ) -> AppResult<Self> {
        let (secret, minutes) = match kind {
            TokenKind::Access => (&config.access_secret, config.access_token_expire_minutes),
            TokenKind::Refresh => (&config.refresh_secret, config.refresh_token_expire_minutes),
        };
        let lifetime = i64::try_from(minutes)
            .ok()
            .and_then(chrono::TimeDelta::try_minutes)
            .ok_or_else(|| {
                AppError::configuration(format!("{kind} token lifetime is out of range"))
            })?;
        Self::new(kind, secret, &config.algorithm, lifetime, cache)
    }

    /// Which kind this engine handles.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Issue a token for `account_id`, valid for the configured lifetime.
    pub fn generate(&self, account_id: Uuid) -> AppResult<String> {
        self.sign(&TokenPayload::new(account_id, self.lifetime))
    }

    /// Sign an arbitrary payload with this engine's secret.
    pub fn sign(&self, payload: &TokenPayload) -> AppResult<String> {
        encode(&self.header, payload, &self.encoding_key).map_err(|e| {
            AppError::internal(format!("Failed to encode {} token: {e}", self.kind))
        })
    }

    /// Validate `token` and return its payload.
    ///
    /// Revocation is checked before the signature. Expiry is enforced with
    /// zero leeway.
    pub async fn extract_payload(&self, token: &str) -> AppResult<TokenPayload> {
        if self.is_revoked(token).await? {
            return Err(AppError::token_revoked(format!(
                "The {} token has been revoked",
                self.kind
            )));
        }

        decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::token_expired(format!("The {} token has expired", self.kind))
                }
                _ => AppError::token_invalid(format!("Invalid {} token: {e}", self.kind)),
            })
    }

    /// Add `token` to the revocation cache. An empty token is a no-op.
    ///
    /// The signature must be valid; expiry is not enforced so that an
    /// already-expired token can still be revoked. Returns `true` only for
    /// the call that actually inserted the entry.
    pub async fn revoke(&self, token: &str) -> AppResult<bool> {
        if token.is_empty() {
            return Ok(false);
        }

        let mut validation = self.validation.clone();
        validation.validate_exp = false;
        let payload = decode::<TokenPayload>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                AppError::token_invalid(format!("Cannot revoke invalid {} token: {e}", self.kind))
            })?;

        let inserted = self
            .cache
            .set_nx(token, self.kind.tag(), payload.revocation_ttl())
            .await
            .inspect_err(|e| warn!(error = %e, kind = %self.kind, "Failed to revoke token"))?;

        debug!(
            account_id = %payload.account_id,
            kind = %self.kind,
            already_revoked = !inserted,
            "Token revoked"
        );
        Ok(inserted)
    }

    /// Whether `token` is present in the revocation cache.
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        self.cache.exists(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_cache::memory::MemoryCacheProvider;
    use coursehub_core::config::cache::MemoryCacheConfig;
    use coursehub_core::error::ErrorKind;

    fn cache() -> Arc<CacheManager> {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig::default());
        Arc::new(CacheManager::from_provider(Arc::new(provider)))
    }

    fn engine(kind: TokenKind, secret: &str, cache: Arc<CacheManager>) -> TokenEngine {
        TokenEngine::new(kind, secret, "HS256", chrono::Duration::minutes(15), cache).unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_extract_returns_same_account() {
        let engine = engine(TokenKind::Access, "access-secret", cache());
        let account_id = Uuid::new_v4();
        let token = engine.generate(account_id).unwrap();

        let payload = engine.extract_payload(&token).await.unwrap();
        assert_eq!(payload.account_id, account_id);
        assert_eq!(payload.expires_at - payload.issued_at, 15 * 60);
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let cache = cache();
        let engine = engine(TokenKind::Access, "access-secret", cache.clone());
        let token = engine.generate(Uuid::new_v4()).unwrap();

        engine.revoke(&token).await.unwrap();

        assert!(engine.is_revoked(&token).await.unwrap());
        assert_eq!(cache.get(&token).await.unwrap().as_deref(), Some("access"));
        let err = engine.extract_payload(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenRevoked);
    }

    #[tokio::test]
    async fn test_revoke_twice_keeps_first_entry() {
        let engine = engine(TokenKind::Refresh, "refresh-secret", cache());
        let token = engine.generate(Uuid::new_v4()).unwrap();
        assert!(engine.revoke(&token).await.unwrap());
        assert!(!engine.revoke(&token).await.unwrap());
        assert!(engine.is_revoked(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_token_is_expired_not_invalid() {
        let engine = engine(TokenKind::Access, "access-secret", cache());
        let payload = TokenPayload::new(Uuid::new_v4(), chrono::Duration::minutes(-1));
        let token = engine.sign(&payload).unwrap();

        let err = engine.extract_payload(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[tokio::test]
    async fn test_expired_token_can_still_be_revoked() {
        let engine = engine(TokenKind::Access, "access-secret", cache());
        let payload = TokenPayload::new(Uuid::new_v4(), chrono::Duration::minutes(-1));
        let token = engine.sign(&payload).unwrap();

        engine.revoke(&token).await.unwrap();
        assert!(engine.is_revoked(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_invalid() {
        let cache = cache();
        let access = engine(TokenKind::Access, "access-secret", cache.clone());
        let refresh = engine(TokenKind::Refresh, "refresh-secret", cache);
        let token = access.generate(Uuid::new_v4()).unwrap();

        let err = refresh.extract_payload(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
        assert_eq!(
            refresh.revoke(&token).await.unwrap_err().kind,
            ErrorKind::TokenInvalid
        );
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let engine = engine(TokenKind::Access, "access-secret", cache());
        let err = engine.extract_payload("not.a.token").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[tokio::test]
    async fn test_revoke_empty_token_is_noop() {
        let engine = engine(TokenKind::Access, "access-secret", cache());
        assert!(!engine.revoke("").await.unwrap());
        assert!(!engine.is_revoked("").await.unwrap());
    }

    #[test]
    fn test_rejects_non_hmac_algorithm() {
        let err = TokenEngine::new(
            TokenKind::Access,
            "secret",
            "RS256",
            chrono::Duration::minutes(1),
            cache(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_empty_secret() {
        let err = TokenEngine::new(
            TokenKind::Refresh,
            "",
            "HS512",
            chrono::Duration::minutes(1),
            cache(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_oversized_lifetime_is_configuration_error() {
        let config = AuthConfig {
            access_secret: "access-secret".to_string(),
            refresh_secret: "refresh-secret".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: i64::MAX as u64,
            refresh_token_expire_minutes: 60,
            password_min_length: 8,
        };
        let err = TokenEngine::from_config(TokenKind::Access, &config, cache()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(TokenEngine::from_config(TokenKind::Refresh, &config, cache()).is_ok());
    }
}

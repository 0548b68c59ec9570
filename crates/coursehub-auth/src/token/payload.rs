//! Signed token payload.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest time a revoked token is kept in the revocation cache.
pub const MIN_REVOCATION_TTL: Duration = Duration::from_secs(60);

/// Claims carried by both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Account the token was issued to.
    pub account_id: Uuid,
    /// 16 random bytes, hex encoded. Makes tokens issued in the same second distinct.
    pub salt: String,
    /// Issue time, seconds since epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry time, seconds since epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl TokenPayload {
    /// Payload for `account_id` issued now and valid for `lifetime`.
    pub fn new(account_id: Uuid, lifetime: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            salt: Uuid::new_v4().simple().to_string(),
            issued_at: now.timestamp(),
            expires_at: (now + lifetime).timestamp(),
        }
    }

    /// Whether the expiry is in the past.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.expires_at
    }

    /// How long a revoked copy of this token must stay blocklisted.
    ///
    /// The remaining lifetime, floored at [`MIN_REVOCATION_TTL`] to cover clock skew.
    pub fn revocation_ttl(&self) -> Duration {
        let remaining = self.expires_at - Utc::now().timestamp();
        u64::try_from(remaining)
            .map(Duration::from_secs)
            .unwrap_or(Duration::ZERO)
            .max(MIN_REVOCATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload_fields() {
        let account_id = Uuid::new_v4();
        let payload = TokenPayload::new(account_id, chrono::Duration::minutes(30));
        assert_eq!(payload.account_id, account_id);
        assert_eq!(payload.salt.len(), 32);
        assert_eq!(payload.expires_at - payload.issued_at, 30 * 60);
        assert!(!payload.is_expired());
    }

    #[test]
    fn test_revocation_ttl_tracks_remaining_lifetime() {
        let payload = TokenPayload::new(Uuid::new_v4(), chrono::Duration::hours(2));
        let ttl = payload.revocation_ttl();
        assert!(ttl > Duration::from_secs(7190));
        assert!(ttl <= Duration::from_secs(7200));
    }

    #[test]
    fn test_revocation_ttl_floor_for_expired_token() {
        let payload = TokenPayload::new(Uuid::new_v4(), chrono::Duration::minutes(-5));
        assert!(payload.is_expired());
        assert_eq!(payload.revocation_ttl(), MIN_REVOCATION_TTL);
    }

    #[test]
    fn test_serialized_claim_names() {
        let payload = TokenPayload::new(Uuid::new_v4(), chrono::Duration::minutes(1));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("iat").is_some());
        assert!(json.get("exp").is_some());
        assert!(json.get("account_id").is_some());
        assert!(json.get("salt").is_some());
    }
}

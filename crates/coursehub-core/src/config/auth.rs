//! Token and credential configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Signing algorithms accepted for both token kinds.
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Token signing and credential configuration.
///
/// Both secrets are required and have no default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub access_secret: String,
    /// HMAC secret used to sign refresh tokens.
    pub refresh_secret: String,
    /// Signing algorithm shared by both token kinds.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_expire_minutes: u64,
    /// Refresh token lifetime in minutes.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_expire_minutes: u64,
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Reject empty secrets, zero lifetimes, and non-HMAC algorithms.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.access_secret is required (COURSEHUB_AUTH__ACCESS_SECRET)",
            ));
        }
        if self.refresh_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.refresh_secret is required (COURSEHUB_AUTH__REFRESH_SECRET)",
            ));
        }
        if !SUPPORTED_ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(AppError::configuration(format!(
                "Unsupported signing algorithm '{}'. Supported: {}",
                self.algorithm,
                SUPPORTED_ALGORITHMS.join(", ")
            )));
        }
        if self.access_token_expire_minutes == 0 || self.refresh_token_expire_minutes == 0 {
            return Err(AppError::configuration("Token lifetimes must be positive"));
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    60 * 24 * 7
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            access_secret: "access".to_string(),
            refresh_secret: "refresh".to_string(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_access_ttl(),
            refresh_token_expire_minutes: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut cfg = config();
        cfg.refresh_secret = "  ".to_string();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let mut cfg = config();
        cfg.algorithm = "RS256".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_missing_secret_fails_deserialization() {
        let json = serde_json::json!({ "access_secret": "only-one" });
        let parsed: Result<AuthConfig, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}

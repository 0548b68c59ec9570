//! Password policy for new and changed passwords.

use coursehub_core::config::AuthConfig;
use coursehub_core::error::AppError;

/// Enforces a minimum length and a zxcvbn strength score.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Build a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_min_length(config.password_min_length)
    }

    /// Build a validator with an explicit minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Reject passwords that are too short or too guessable.
    pub fn validate(&self, password: &str, login: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[login]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak, use a longer or less predictable one",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        let validator = PasswordValidator::with_min_length(12);
        let err = validator.validate("Sh0rt!", "alice").unwrap_err();
        assert!(err.message.contains("at least 12"));
    }

    #[test]
    fn test_weak_password_rejected() {
        let validator = PasswordValidator::with_min_length(8);
        assert!(validator.validate("password", "alice").is_err());
        assert!(validator.validate("alice123", "alice").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        let validator = PasswordValidator::with_min_length(8);
        assert!(validator.validate("Tr0mbone-Quarry-Lattice", "alice").is_ok());
    }
}

//! Credential checks and token pair lifecycle.

use std::sync::Arc;

use tracing::{info, warn};

use coursehub_auth::password::PasswordHasher;
use coursehub_auth::token::{SessionTokens, TokenPayload, TokenService};
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::repositories::AccountRepository;
use coursehub_entity::account::Account;

const BAD_CREDENTIALS: &str = "Incorrect login or password";

/// Authenticates accounts and manages their token pairs.
#[derive(Debug, Clone)]
pub struct SessionService {
    account_repo: Arc<AccountRepository>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenService>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        account_repo: Arc<AccountRepository>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            account_repo,
            hasher,
            tokens,
        }
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown login and wrong password fail identically.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<SessionTokens> {
        let Some(account) = self.account_repo.find_by_login(login.trim()).await? else {
            warn!(login = %login, "Login attempt for unknown account");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(account_id = %account.id, "Login attempt with wrong password");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        let tokens = self.tokens.generate_tokens(account.id)?;
        info!(account_id = %account.id, "Account logged in");
        Ok(tokens)
    }

    /// Exchange a pair for a fresh one.
    pub async fn refresh(&self, mut tokens: SessionTokens) -> AppResult<SessionTokens> {
        self.tokens.refresh_tokens(&mut tokens).await
    }

    /// Revoke a pair. Both tokens must carry a valid signature.
    pub async fn logout(&self, mut tokens: SessionTokens) -> AppResult<()> {
        self.tokens.revoke_tokens(&mut tokens).await?;
        info!("Token pair revoked");
        Ok(())
    }

    /// Resolve a bearer access token to its account.
    ///
    /// Fails with `Authentication` if the account no longer exists.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<(TokenPayload, Account)> {
        let payload = self.tokens.authenticate(access_token).await?;
        let account = self
            .account_repo
            .find_by_id(payload.account_id)
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;
        Ok((payload, account))
    }
}

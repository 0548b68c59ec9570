//! `CurrentAccount` extractor: pulls the bearer token from the
//! Authorization header, validates it, and loads the account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use coursehub_core::error::AppError;
use coursehub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub RequestContext);

impl CurrentAccount {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for CurrentAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extract the raw token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Not authenticated"))?;

        let token = bearer_token(header)
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let (_payload, account) = state.session_service.authenticate(token).await?;

        Ok(CurrentAccount(RequestContext::new(account.id, account.login)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}

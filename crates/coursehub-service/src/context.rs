//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is acting on the current request.
///
/// Built by the HTTP layer from a validated access token and passed into
/// every service method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account.
    pub account_id: Uuid,
    /// The account's login.
    pub login: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: Uuid, login: impl Into<String>) -> Self {
        Self {
            account_id,
            login: login.into(),
            request_time: Utc::now(),
        }
    }
}

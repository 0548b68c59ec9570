//! Token kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distinguishes the two token kinds. Each has its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived token exchanged for a fresh pair.
    Refresh,
}

impl TokenKind {
    /// Value stored in the revocation cache for a revoked token of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

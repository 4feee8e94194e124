//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims structure for the JWT payload.
///
/// Only `exp` is enforced by the decoder; `sub` is validated separately so a
/// structurally valid token without a subject can be reported distinctly
/// from a malformed one. `role` and `user_id` are optional and travel
/// through to downstream handlers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the session identity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<i64>,

    /// Role identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// User identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Claims {
    /// Creates new claims for an access token valid for `ttl_seconds`
    pub fn new(
        subject: impl Into<String>,
        role: Option<String>,
        user_id: Option<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: Some(subject.into()),
            exp: expiry.timestamp(),
            iat: Some(now.timestamp()),
            role,
            user_id,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The subject, when present and non-empty
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}

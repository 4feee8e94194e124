//! Domain-specific error types for gate decisions and session store access.

use thiserror::Error;

/// Terminal rejection kinds produced by the request gate.
///
/// Every variant maps to an HTTP 401 with a kind-specific message. The
/// message is the only detail that reaches the client; diagnostic context
/// (decode errors, store failures) is logged server-side only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Session validation unavailable")]
    StoreUnavailable,

    #[error("Session expired due to inactivity")]
    SessionInactive,
}

impl GateError {
    /// The human-readable message returned to the client in the 401 body
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "No token provided",
            Self::ExpiredToken => "Token expired",
            Self::InvalidToken => "Invalid token",
            Self::InvalidClaims => "Invalid token claims",
            Self::StoreUnavailable => "Session validation unavailable",
            Self::SessionInactive => "Session expired due to inactivity",
        }
    }
}

/// Failures reported by a session store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Session store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

pub type GateResult<T> = Result<T, GateError>;
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages_are_kind_specific() {
        // Missing subject must never be conflated with a malformed token.
        assert_ne!(
            GateError::InvalidClaims.client_message(),
            GateError::InvalidToken.client_message()
        );
        assert_eq!(GateError::MissingToken.client_message(), "No token provided");
        assert_eq!(
            GateError::SessionInactive.client_message(),
            "Session expired due to inactivity"
        );
    }

    #[test]
    fn test_display_matches_client_message() {
        for err in [
            GateError::MissingToken,
            GateError::ExpiredToken,
            GateError::InvalidToken,
            GateError::InvalidClaims,
            GateError::StoreUnavailable,
            GateError::SessionInactive,
        ] {
            assert_eq!(err.to_string(), err.client_message());
        }
    }
}

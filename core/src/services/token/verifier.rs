//! JWT verification for the request gate.
//!
//! This is a defense-in-depth layer: signature and lifetime only. Issuer and
//! audience were validated at issuance and are deliberately not re-checked
//! here. Note that a forced logout flips only the store's logged-in flag; a
//! still-unexpired token remains cryptographically valid afterwards.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::domain::entities::Claims;
use crate::errors::{GateError, GateResult};

/// Verifies bearer tokens against the configured symmetric signing key
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Issuer/audience are checked at issuance, not here.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Extract the bearer token from a raw `Authorization` header value:
    /// the last whitespace-delimited segment, when non-empty. A header like
    /// `"Bearer "` carries no token.
    pub fn bearer_token(header: &str) -> Option<&str> {
        header
            .split(char::is_whitespace)
            .last()
            .filter(|t| !t.is_empty())
    }

    /// Validate signature and lifetime, then the claim schema.
    ///
    /// Failure mapping:
    /// * expired lifetime -> `ExpiredToken`
    /// * any other decode failure -> `InvalidToken` (detail logged only)
    /// * valid token without a subject -> `InvalidClaims`
    pub fn verify(&self, token: &str) -> GateResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    GateError::ExpiredToken
                } else {
                    debug!("token rejected: {}", e);
                    GateError::InvalidToken
                }
            })?;

        let claims = token_data.claims;
        if claims.subject().is_none() {
            debug!("token accepted cryptographically but carries no subject claim");
            return Err(GateError::InvalidClaims);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(TokenVerifier::bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(TokenVerifier::bearer_token("abc"), Some("abc"));
        assert_eq!(TokenVerifier::bearer_token("Bearer  abc"), Some("abc"));
        assert_eq!(TokenVerifier::bearer_token("Bearer "), None);
        assert_eq!(TokenVerifier::bearer_token(""), None);
        assert_eq!(TokenVerifier::bearer_token("   "), None);
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET);
        let claims = Claims::new("alice", Some("admin".into()), Some("42".into()), 300);
        let token = mint(&claims, SECRET);

        let verified = verifier.verify(&token).unwrap();
        assert_eq!(verified.subject(), Some("alice"));
        assert_eq!(verified.role.as_deref(), Some("admin"));
        assert_eq!(verified.user_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_expired_token_is_distinct() {
        let verifier = TokenVerifier::new(SECRET);
        // Far enough in the past to defeat the default decode leeway.
        let claims = Claims::new("alice", None, None, -300);
        let token = mint(&claims, SECRET);

        assert_eq!(verifier.verify(&token), Err(GateError::ExpiredToken));
    }

    #[test]
    fn test_wrong_signature_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);
        let claims = Claims::new("alice", None, None, 300);
        let token = mint(&claims, "some-other-secret");

        assert_eq!(verifier.verify(&token), Err(GateError::InvalidToken));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify("not-a-jwt-at-all"),
            Err(GateError::InvalidToken)
        );
    }

    #[test]
    fn test_missing_subject_is_invalid_claims() {
        let verifier = TokenVerifier::new(SECRET);
        let mut claims = Claims::new("alice", None, None, 300);
        claims.sub = None;
        let token = mint(&claims, SECRET);

        assert_eq!(verifier.verify(&token), Err(GateError::InvalidClaims));
    }

    #[test]
    fn test_empty_subject_is_invalid_claims() {
        let verifier = TokenVerifier::new(SECRET);
        let mut claims = Claims::new("alice", None, None, 300);
        claims.sub = Some(String::new());
        let token = mint(&claims, SECRET);

        assert_eq!(verifier.verify(&token), Err(GateError::InvalidClaims));
    }
}

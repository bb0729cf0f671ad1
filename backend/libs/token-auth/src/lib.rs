//! Bearer-token verification for the discussion board services
//!
//! Tokens are compact JWTs signed with a shared HS256 secret. The secret is
//! never defaulted: [`TokenVerifier::new`] rejects anything shorter than 32
//! bytes, so a service that boots without an explicit, reasonably strong
//! secret fails at startup instead of silently accepting forgeable tokens.
//!
//! This crate only verifies credentials. Token issuance lives with whatever
//! service owns login/signup; [`test_utils`] can mint tokens for tests.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod test_utils;

/// 256 bits, the floor for an HS256 signing key.
const MIN_SECRET_LENGTH: usize = 32;

/// Claims carried by a board token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Display name shown next to authored content
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authenticated caller extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("missing Authorization header")]
    MissingCredentials,

    #[error("invalid token format")]
    MalformedHeader,

    #[error("invalid token")]
    Invalid,

    #[error("token secret must be at least {MIN_SECRET_LENGTH} bytes")]
    WeakSecret,
}

/// Extract the raw token from an `Authorization: Bearer <token>` value.
pub fn parse_bearer(header: &str) -> Result<&str, TokenError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(TokenError::MalformedHeader)?;
    if token.is_empty() {
        return Err(TokenError::MalformedHeader);
    }
    Ok(token)
}

/// Validates bearer credentials against a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from the shared secret. Fails on weak secrets.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verify a raw token and extract the caller's identity.
    ///
    /// Fails on bad signatures, expired tokens, and subjects that are not
    /// valid UUIDs. Pure validation, no side effects.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)?;

        Ok(Identity {
            id,
            username: data.claims.username,
        })
    }

    /// Full gate for an optional `Authorization` header value: requires the
    /// header to be present, shaped as `Bearer <token>`, and to verify.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, TokenError> {
        let header = header.ok_or(TokenError::MissingCredentials)?;
        let token = parse_bearer(header)?;
        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{issue_token, issue_token_with_expiry, TEST_SECRET};

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(TEST_SECRET).expect("test secret should be accepted")
    }

    #[test]
    fn verifies_a_freshly_issued_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(TEST_SECRET, user_id, "alice");

        let identity = verifier().verify(&token).unwrap();
        assert_eq!(identity.id, user_id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn rejects_weak_secret() {
        assert!(matches!(
            TokenVerifier::new("short"),
            Err(TokenError::WeakSecret)
        ));
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(verifier().verify("not.a.token").is_err());
    }

    #[test]
    fn rejects_tampered_token() {
        let token = issue_token(TEST_SECRET, Uuid::new_v4(), "alice");
        let tampered = format!("{}x", token);
        assert!(verifier().verify(&tampered).is_err());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = "another-secret-that-is-long-enough-to-pass-validation";
        let token = issue_token(other, Uuid::new_v4(), "alice");
        assert!(verifier().verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // Issued two hours ago, expired one hour ago; well past any leeway.
        let token = issue_token_with_expiry(TEST_SECRET, Uuid::new_v4(), "alice", -3600);
        assert!(matches!(
            verifier().verify(&token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn bearer_parsing() {
        assert_eq!(parse_bearer("Bearer abc").unwrap(), "abc");
        assert!(matches!(
            parse_bearer("Basic abc"),
            Err(TokenError::MalformedHeader)
        ));
        assert!(matches!(
            parse_bearer("Bearer "),
            Err(TokenError::MalformedHeader)
        ));
        assert!(matches!(
            parse_bearer("abc"),
            Err(TokenError::MalformedHeader)
        ));
    }

    #[test]
    fn authenticate_requires_header() {
        assert!(matches!(
            verifier().authenticate(None),
            Err(TokenError::MissingCredentials)
        ));
    }

    #[test]
    fn authenticate_accepts_full_header() {
        let user_id = Uuid::new_v4();
        let token = issue_token(TEST_SECRET, user_id, "bob");
        let header = format!("Bearer {}", token);

        let identity = verifier().authenticate(Some(&header)).unwrap();
        assert_eq!(identity.id, user_id);
    }
}

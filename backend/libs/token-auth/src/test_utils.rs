//! Token minting helpers for tests
//!
//! Issuance is not part of this crate's production surface; these helpers
//! exist so service tests can exercise the verification path end to end.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::Claims;

/// Shared secret for tests. Long enough to pass strength validation.
pub const TEST_SECRET: &str = "test-only-secret-0123456789abcdef0123456789abcdef";

/// Issue a token that expires one hour from now.
pub fn issue_token(secret: &str, user_id: Uuid, username: &str) -> String {
    issue_token_with_expiry(secret, user_id, username, 3600)
}

/// Issue a token whose expiry is `expiry_offset_secs` from now.
///
/// Negative offsets produce already-expired tokens.
pub fn issue_token_with_expiry(
    secret: &str,
    user_id: Uuid,
    username: &str,
    expiry_offset_secs: i64,
) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: (now - Duration::hours(1)).timestamp(),
        exp: (now + Duration::seconds(expiry_offset_secs)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding cannot fail with valid claims")
}

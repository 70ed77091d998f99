use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use bcrypt::DEFAULT_COST;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::ApiError};

/// Lifetime of an issued session token.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims
///
/// The payload structure signed into every session token (JWT, HS256). Validity is
/// proof of signature plus non-expiry; the credential store is never consulted
/// after issuance.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (sub): the admin's row id.
    pub sub: i64,
    /// The admin's username, echoed back by the verify endpoint.
    pub username: String,
    /// Issued At (iat): timestamp when the token was issued.
    pub iat: usize,
    /// Expiration Time (exp): timestamp after which the token must not be accepted.
    pub exp: usize,
}

/// Signs a fresh token for the given admin identity, expiring `TOKEN_TTL_HOURS`
/// from now.
pub fn issue_token(id: i64, username: &str, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: id,
        username: username.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token signing failed: {:?}", e);
        ApiError::Store
    })
}

/// Validates a presented token. Rejects bad signatures, malformed structure and
/// expired tokens uniformly as `Forbidden`; attacker-supplied garbage never panics.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::default();
    // Ensure expiration time validation is always active.
    validation.validate_exp = true;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| ApiError::Forbidden)
}

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| {
        tracing::error!("password hashing failed: {:?}", e);
        ApiError::Store
    })
}

/// Compares a login attempt against the stored hash. A hash-parse failure counts
/// as a mismatch rather than an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// AuthAdmin
///
/// The resolved identity of an authenticated request, decoded straight from the
/// token claims. Handlers take this as an argument to require authentication.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: i64,
    pub username: String,
}

/// AuthAdmin Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthAdmin usable as a function
/// argument in any protected handler. This cleanly separates authentication
/// (extractor) from business logic (the handler).
///
/// This is a pure gate: it reads `Authorization: Bearer <token>`, verifies the
/// signature and expiry, and attaches the decoded identity. It has no side effects
/// and never queries the credential store.
///
/// Rejection: 401 when no token is supplied, 403 when a supplied token fails
/// verification.
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the token secret).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        // Token Extraction
        // A missing or non-Bearer Authorization header means no credential at all.
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        // A credential was presented; from here on failure is 403, not 401.
        let claims = verify_token(token, &config.jwt_secret)?;

        Ok(AuthAdmin {
            id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token(1, "admin", SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue_token(1, "admin", SECRET).unwrap();
        // Flip the last signature character to a different base64 symbol.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(verify_token(&tampered, SECRET), Err(ApiError::Forbidden));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(1, "admin", SECRET).unwrap();
        assert_eq!(
            verify_token(&token, "some-other-secret"),
            Err(ApiError::Forbidden)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        // Manufacture a token whose expiry is comfortably past the default leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            username: "admin".to_string(),
            iat: (now - Duration::hours(48)).timestamp() as usize,
            exp: (now - Duration::hours(24)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(verify_token(&token, SECRET), Err(ApiError::Forbidden));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(
            verify_token("not-even-a-jwt", SECRET),
            Err(ApiError::Forbidden)
        );
    }

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
    }
}

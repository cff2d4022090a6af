//! Bearer tokens for hoteliers
//!
//! HS256 tokens whose `sub` is the hotelier id. Expiry is enforced with no
//! leeway so `expires_in` on the login response is exact.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ISSUER: &str = "hotel-reservations";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Token lifetime as reported to clients.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiration_hours * 3600
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;
        validation
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new("change-me-in-production", 24)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token subject is not a hotelier id")]
    BadSubject,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Hotelier id, as a string per RFC 7519
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    fn for_hotelier(hotelier_id: i32, username: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        Self {
            sub: hotelier_id.to_string(),
            username: username.to_string(),
            exp: (now + Duration::hours(config.expiration_hours)).timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn hotelier_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

pub fn create_token(
    hotelier_id: i32,
    username: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let claims = TokenClaims::for_hotelier(hotelier_id, username, config);
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

/// Decode `token`, checking signature, issuer, expiry and that `sub` is numeric.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Jwt(e),
    })?;

    if data.claims.hotelier_id().is_none() {
        return Err(TokenError::BadSubject);
    }
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret", 1)
    }

    fn signed(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_hotelier() {
        let token = create_token(12, "marazul", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.hotelier_id(), Some(12));
        assert_eq!(claims.username, "marazul");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn foreign_secret_or_issuer_is_rejected() {
        let token = create_token(1, "a", &config()).unwrap();

        let other_secret = JwtConfig::new("other", 1);
        assert!(matches!(verify_token(&token, &other_secret), Err(TokenError::Jwt(_))));

        let other_issuer = JwtConfig {
            issuer: "someone-else".into(),
            ..config()
        };
        assert!(matches!(verify_token(&token, &other_issuer), Err(TokenError::Jwt(_))));
    }

    #[test]
    fn past_expiry_is_reported_as_expired() {
        let mut claims = TokenClaims::for_hotelier(3, "sol", &config());
        claims.exp = Utc::now().timestamp() - 10;
        let token = signed(&claims, "test-secret");
        assert!(matches!(verify_token(&token, &config()), Err(TokenError::Expired)));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let mut claims = TokenClaims::for_hotelier(3, "sol", &config());
        claims.sub = "admin".into();
        let token = signed(&claims, "test-secret");
        assert!(matches!(verify_token(&token, &config()), Err(TokenError::BadSubject)));
    }

    #[test]
    fn expires_in_matches_hours() {
        assert_eq!(JwtConfig::new("s", 24).expires_in_secs(), 86_400);
    }
}

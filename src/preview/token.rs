//! Signed preview tokens (HS256 JWT) carried in the `payload-token` cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Only tokens minted for this auth collection may enable previews.
pub const AUTH_COLLECTION: &str = "users";

const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token was issued for collection '{0}'")]
    WrongCollection(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub collection: String,
}

impl Claims {
    pub fn new(subject: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            collection: AUTH_COLLECTION.to_string(),
        }
    }
}

/// Issues and verifies preview tokens with the server's secret.
#[derive(Clone)]
pub struct PreviewAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl PreviewAuth {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        // Capped at ten years; chrono panics on out-of-range durations.
        let ttl_secs = ttl_secs.min(MAX_TTL_SECS) as i64;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.encode(&Claims::new(subject, self.ttl))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }

    /// Checks signature, expiry and the auth collection.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.collection != AUTH_COLLECTION {
            return Err(TokenError::WrongCollection(claims.collection));
        }
        Ok(claims)
    }
}

//! Token codec for issuing and verifying signed admin tokens
//!
//! Tokens are HS256 JWTs carrying the admin identity, the session record
//! they were issued with, and a fixed expiry. Expiry is checked here against
//! a caller-supplied instant rather than inside `jsonwebtoken`, so the
//! validity window can be exercised precisely.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TokenConfig;

/// Identity claims supplied when issuing a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub admin_id: i32,
    pub email: String,
    pub is_admin: bool,
    /// Identifier of the session record the token belongs to
    pub session_id: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Admin ID
    pub user_id: i32,
    pub email: String,
    pub is_admin: bool,
    /// Session record identifier
    pub sid: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

/// Why a token was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Signs and verifies tokens with the server secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenCodec {
    /// Initialize a codec from its configuration
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token valid for the configured window starting at `issued_at`
    pub fn issue(&self, subject: &TokenSubject, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            user_id: subject.admin_id,
            email: subject.email.clone(),
            is_admin: subject.is_admin,
            sid: subject.session_id.clone(),
            iat,
            exp: iat + self.ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify the signature, then the expiry against `now`.
    ///
    /// A token is valid while `now < exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

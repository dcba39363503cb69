use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::config::SecurityConfig;

/// Decoded payload of an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username). Presence is checked by the access gate, not here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.into()),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Subject if present and non-empty
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is empty")]
    InvalidSecret,

    #[error("Token lifetime out of range: {0} minutes")]
    InvalidExpiry(i64),

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
}

/// Mints and validates signed bearer tokens with a process-wide secret.
///
/// Only HMAC algorithms are accepted since the key is a shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, algorithm: &str, default_ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(TokenError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            default_ttl,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, TokenError> {
        let minutes = config.token_expiry_minutes;
        let ttl = Duration::try_minutes(minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(TokenError::InvalidExpiry(minutes))?;

        Self::new(&config.jwt_secret, &config.jwt_algorithm, ttl)
    }

    /// Sign a token for `subject`, expiring after `ttl` or the default TTL
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, ttl.unwrap_or(self.default_ttl));
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(TokenError::TokenGeneration)
    }

    /// Verify signature, algorithm and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

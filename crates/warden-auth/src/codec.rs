//! Signing and verifying expiring claims.
//!
//! [`TokenCodec`] is a pure function of (claims, ttl, now, secret, algorithm). Time
//! comes from an injected [`Clock`], so `jsonwebtoken`'s own wall-clock expiry check
//! is switched off and expiry is enforced here instead: a token is expired once
//! `now >= exp`.
//!
//! Only the HMAC family (`HS256`, `HS384`, `HS512`) is supported, since tokens are
//! signed and verified with one shared secret.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warden_core::{Clock, ServiceError};

use crate::claims::TokenClaims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature and structure are fine but `exp` has passed. Recoverable via refresh.
    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed token, missing claim or wrong token kind.
    #[error("Token is invalid")]
    Invalid,

    #[error("Failed to issue token: {0}")]
    Issuance(String),
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ServiceError::TokenExpired,
            TokenError::Invalid => ServiceError::TokenInvalid,
            TokenError::Issuance(reason) => ServiceError::TokenIssuance(reason),
        }
    }
}

/// Claims plus the absolute expiry (Unix seconds) the codec attached to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiring<C> {
    #[serde(flatten)]
    pub claims: C,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    algorithm_name: String,
    algorithm: Option<Algorithm>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm_name)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Builds a codec. An unknown or non-HMAC `algorithm` is accepted here and
    /// surfaces on first use: issuing fails with [`TokenError::Issuance`] and
    /// decoding with [`TokenError::Invalid`].
    pub fn new(secret: &str, algorithm: &str, clock: Arc<dyn Clock>) -> Self {
        let parsed = Algorithm::from_str(algorithm)
            .ok()
            .filter(|alg| matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512));

        Self {
            algorithm_name: algorithm.to_string(),
            algorithm: parsed,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    /// Signs `claims` with `exp = now + ttl`.
    pub fn issue<C: Serialize>(&self, claims: &C, ttl: Duration) -> Result<String, TokenError> {
        let algorithm = self.algorithm.ok_or_else(|| {
            TokenError::Issuance(format!(
                "unsupported signing algorithm '{}'",
                self.algorithm_name
            ))
        })?;

        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Issuance(format!("token lifetime {ttl} is out of range")))?;

        let payload = Expiring {
            claims,
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Issuance(e.to_string()))
    }

    /// Verifies signature, structure and expiry, returning the claims and their `exp`.
    pub fn decode<C: DeserializeOwned>(&self, token: &str) -> Result<Expiring<C>, TokenError> {
        let algorithm = self.algorithm.ok_or(TokenError::Invalid)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let decoded = decode::<Expiring<C>>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        if self.clock.now().timestamp() >= decoded.exp {
            return Err(TokenError::Expired);
        }

        Ok(decoded)
    }

    /// [`decode`](Self::decode), additionally rejecting tokens of the other kind.
    pub fn decode_as<C: TokenClaims>(&self, token: &str) -> Result<Expiring<C>, TokenError> {
        let decoded = self.decode::<C>(token)?;

        if decoded.claims.kind() != C::KIND {
            return Err(TokenError::Invalid);
        }

        Ok(decoded)
    }
}

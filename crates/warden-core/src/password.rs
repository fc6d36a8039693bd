//! Password hashing and verification using bcrypt.
//!
//! Digests are salted, so hashing the same plaintext twice yields two different
//! strings that both verify. The work factor is configurable through
//! [`PasswordHasher::new`]; tests use the bcrypt minimum to stay fast.
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are refused
//! when hashing and never match when verifying, so two passwords sharing a 72-byte
//! prefix cannot stand in for each other.

use bcrypt::{BcryptError, DEFAULT_COST};

use crate::errors::ServiceError;

/// Stateless bcrypt hasher carrying only its cost factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `plaintext` into a bcrypt digest.
    ///
    /// # Errors
    ///
    /// `Validation` if `plaintext` is longer than 72 bytes, `Internal` if the configured
    /// cost is outside bcrypt's accepted range.
    pub fn hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        bcrypt::non_truncating_hash(plaintext, self.cost).map_err(|e| match e {
            BcryptError::Truncation(_) => {
                ServiceError::validation("Password must be at most 72 bytes long")
            }
            e => ServiceError::internal(format!("Failed to hash password: {}", e)),
        })
    }

    /// Checks `plaintext` against a stored digest.
    ///
    /// A digest that is not valid bcrypt simply does not match. An empty digest means
    /// the caller never loaded one, which is reported rather than treated as a mismatch.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, ServiceError> {
        if digest.is_empty() {
            return Err(ServiceError::internal("Cannot verify password against an empty digest"));
        }

        match bcrypt::non_truncating_verify(plaintext, digest) {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest is malformed");
                Ok(false)
            }
        }
    }
}

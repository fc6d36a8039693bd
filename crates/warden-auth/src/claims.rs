//! JWT claim structures.
//!
//! - [`AccessTokenClaims`]: short-lived, carries the role at issuance time
//! - [`RefreshTokenClaims`]: long-lived, only good for minting a new pair
//!
//! `exp` is not part of these structs; [`crate::codec::TokenCodec`] adds it on issue
//! and hands it back next to the claims on decode.
//!
//! Both carry a `typ` discriminator so one kind of token is never accepted where the
//! other is expected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use warden_models::{Email, Role, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims types that know which token kind they belong to.
pub trait TokenClaims: Serialize + DeserializeOwned {
    const KIND: TokenKind;

    fn kind(&self) -> TokenKind;
}

/// Claims embedded in access tokens.
///
/// The role is informational: request handling always re-reads the live user,
/// since a role may change between issuance and use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub user_id: UserId,
    pub email: Email,
    pub role: Role,
    /// Lifetime of the refresh token issued alongside, in seconds.
    pub refresh_expires: i64,
    pub typ: TokenKind,
}

impl AccessTokenClaims {
    pub fn new(user: &User, refresh_expires: i64) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            role: user.role,
            refresh_expires,
            typ: TokenKind::Access,
        }
    }
}

impl TokenClaims for AccessTokenClaims {
    const KIND: TokenKind = TokenKind::Access;

    fn kind(&self) -> TokenKind {
        self.typ
    }
}

/// Claims embedded in refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub user_id: UserId,
    pub email: Email,
    pub typ: TokenKind,
}

impl RefreshTokenClaims {
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            typ: TokenKind::Refresh,
        }
    }
}

impl TokenClaims for RefreshTokenClaims {
    const KIND: TokenKind = TokenKind::Refresh;

    fn kind(&self) -> TokenKind {
        self.typ
    }
}

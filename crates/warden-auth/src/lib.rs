//! # Warden Auth
//!
//! The pure half of authentication and authorization:
//!
//! - [`claims`]: access and refresh token claim structures
//! - [`codec`]: [`TokenCodec`], which signs and verifies expiring claims against an
//!   injected clock
//! - [`policy`]: [`can_modify`], the decision table for who may change whom
//!
//! Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden_auth::{RefreshTokenClaims, TokenCodec};
//! use warden_core::SystemClock;
//!
//! let codec = TokenCodec::new("secret", "HS256", Arc::new(SystemClock));
//! let token = codec.issue(&RefreshTokenClaims::new(&user), chrono::Duration::days(7))?;
//! let decoded = codec.decode_as::<RefreshTokenClaims>(&token)?;
//! assert_eq!(decoded.claims.user_id, user.user_id);
//! ```

pub mod claims;
pub mod codec;
pub mod policy;

pub use claims::{AccessTokenClaims, RefreshTokenClaims, TokenClaims, TokenKind};
pub use codec::{Expiring, TokenCodec, TokenError};
pub use policy::{UserAction, can_modify, ensure_can_modify};

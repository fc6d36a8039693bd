//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: [`auth::AuthUser`], the bearer-token extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` decodes the access token and re-reads the user it names
//! 3. Handler executes with the live user as the actor
//!
//! Authorization decisions are not made here; the user service consults the policy
//! once it has loaded the target.

pub mod auth;

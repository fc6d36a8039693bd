//! # Warden Config
//!
//! Configuration types for the Warden auth service, loaded from environment variables:
//!
//! - [`jwt`]: token signing secret, algorithm and lifetimes
//! - [`password`]: bcrypt work factor
//! - [`database`]: Postgres connection settings
//! - [`server`]: listen address
//! - [`cors`]: allowed origins
//!
//! Every struct has a `from_env()` constructor that falls back to development
//! defaults, and a `from_vars()` constructor taking any lookup function.
//!
//! # Example
//!
//! ```ignore
//! use warden_config::{JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

use std::str::FromStr;

/// Reads `key` through `lookup` and parses it, falling back to `default` when the
/// variable is unset or unparsable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

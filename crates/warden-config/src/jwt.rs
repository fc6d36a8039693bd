use chrono::Duration;

use crate::{env_lookup, parse_or};

const DEFAULT_ACCESS_MINUTES: i64 = 30;
const DEFAULT_REFRESH_MINUTES: i64 = 60 * 24 * 7;

/// A lifetime of `minutes`, or of `default` minutes when `minutes` is not positive or
/// does not fit a [`Duration`].
fn lifetime(minutes: i64, default: i64) -> Duration {
    Duration::try_minutes(minutes)
        .filter(|ttl| *ttl > Duration::zero())
        .unwrap_or_else(|| Duration::minutes(default))
}

fn lifetime_minutes<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    let minutes = parse_or(lookup, key, default);
    lifetime(minutes, default).num_minutes()
}

/// Token signing configuration.
///
/// Both lifetimes are expressed in minutes. Values that are not positive, or too large
/// to represent, fall back to the defaults.
///
/// | Variable | Default |
/// |---|---|
/// | `SECRET_KEY` | `secret_key` |
/// | `ALGORITHM` | `HS256` |
/// | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30` |
/// | `REFRESH_TOKEN_EXPIRE_MINUTES` | `10080` (7 days) |
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env_lookup)
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("SECRET_KEY").unwrap_or_else(|| "secret_key".to_string()),
            algorithm: lookup("ALGORITHM").unwrap_or_else(|| "HS256".to_string()),
            access_token_expire_minutes: lifetime_minutes(
                &lookup,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                DEFAULT_ACCESS_MINUTES,
            ),
            refresh_token_expire_minutes: lifetime_minutes(
                &lookup,
                "REFRESH_TOKEN_EXPIRE_MINUTES",
                DEFAULT_REFRESH_MINUTES,
            ),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        lifetime(self.access_token_expire_minutes, DEFAULT_ACCESS_MINUTES)
    }

    pub fn refresh_ttl(&self) -> Duration {
        lifetime(self.refresh_token_expire_minutes, DEFAULT_REFRESH_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_vars(vars(&[]));

        assert_eq!(config.secret, "secret_key");
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.access_ttl(), Duration::minutes(30));
        assert_eq!(config.refresh_ttl(), Duration::days(7));
    }

    #[test]
    fn test_overrides() {
        let config = JwtConfig::from_vars(vars(&[
            ("SECRET_KEY", "s3cr3t"),
            ("ALGORITHM", "HS512"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "5"),
            ("REFRESH_TOKEN_EXPIRE_MINUTES", "60"),
        ]));

        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.algorithm, "HS512");
        assert_eq!(config.access_token_expire_minutes, 5);
        assert_eq!(config.refresh_ttl().num_seconds(), 3600);
    }

    #[test]
    fn test_unparsable_lifetime_falls_back() {
        let config = JwtConfig::from_vars(vars(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "soon")]));
        assert_eq!(config.access_token_expire_minutes, 30);
    }

    #[test]
    fn test_non_positive_lifetime_falls_back() {
        let config = JwtConfig::from_vars(vars(&[
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "-5"),
            ("REFRESH_TOKEN_EXPIRE_MINUTES", "0"),
        ]));

        assert_eq!(config.access_ttl(), Duration::minutes(30));
        assert_eq!(config.refresh_ttl(), Duration::days(7));
    }

    #[test]
    fn test_oversized_lifetime_falls_back() {
        let max = i64::MAX.to_string();
        let config = JwtConfig::from_vars(vars(&[("ACCESS_TOKEN_EXPIRE_MINUTES", max.as_str())]));
        assert_eq!(config.access_token_expire_minutes, 30);

        let config = JwtConfig {
            access_token_expire_minutes: i64::MAX,
            refresh_token_expire_minutes: -1,
            ..config
        };
        assert_eq!(config.access_ttl(), Duration::minutes(30));
        assert_eq!(config.refresh_ttl(), Duration::days(7));
    }
}

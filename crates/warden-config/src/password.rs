use crate::{env_lookup, parse_or};

/// bcrypt's own default work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Clone, Copy, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env_lookup)
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST),
        }
    }
}

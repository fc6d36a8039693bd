use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, instrument};
use warden_auth::{AccessTokenClaims, RefreshTokenClaims, TokenCodec};
use warden_config::JwtConfig;
use warden_core::{Clock, PasswordHasher, ServiceError, ServiceResult};
use warden_db::UserStore;
use warden_models::{User, UserId};

use super::model::TokenPair;

/// Turns credentials into users, users into token pairs, and tokens back into live
/// users.
///
/// Token claims are never trusted for identity beyond the `user_id`: every token
/// use re-reads the user so deactivation and role changes take effect immediately.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    access_ttl: Duration,
    refresh_ttl: Duration,
    dummy_digest: String,
}

const DUMMY_PASSWORD: &str = "warden-dummy-password";

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_config: &JwtConfig,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            codec: TokenCodec::new(&jwt_config.secret, &jwt_config.algorithm, clock),
            hasher,
            access_ttl: jwt_config.access_ttl(),
            refresh_ttl: jwt_config.refresh_ttl(),
            dummy_digest: hasher.hash(DUMMY_PASSWORD).unwrap_or_default(),
        }
    }

    /// Looks the user up by email or username and checks the password.
    ///
    /// Unknown identifier, inactive account and wrong password are indistinguishable
    /// to the caller, in outcome and in bcrypt work: a miss is verified against a
    /// dummy digest of the same cost.
    #[instrument(skip(self, plaintext))]
    pub async fn authenticate(
        &self,
        identifier: &str,
        plaintext: &str,
    ) -> ServiceResult<Option<User>> {
        let Some(user) = self.store.find_by_email_or_username(identifier).await? else {
            let _ = self.hasher.verify(plaintext, &self.dummy_digest);
            debug!("No user matches identifier");
            return Ok(None);
        };

        if !self.hasher.verify(plaintext, &user.hashed_password)? {
            debug!(user_id = %user.user_id, "Password mismatch");
            return Ok(None);
        }

        if !user.is_active {
            debug!(user_id = %user.user_id, "User is inactive");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Mints a refresh token and then an access token for `user`.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub fn issue_pair(&self, user: &User) -> ServiceResult<TokenPair> {
        let refresh_token = self
            .codec
            .issue(&RefreshTokenClaims::new(user), self.refresh_ttl)?;

        let access_claims = AccessTokenClaims::new(user, self.refresh_ttl.num_seconds());
        let access_token = self.codec.issue(&access_claims, self.access_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Resolves the live, active user behind an access token.
    #[instrument(skip_all)]
    pub async fn resolve_actor(&self, access_token: &str) -> ServiceResult<User> {
        let decoded = self
            .codec
            .decode_as::<AccessTokenClaims>(access_token)
            .map_err(|e| {
                debug!(error = %e, "Rejected access token");
                ServiceError::Unauthenticated
            })?;

        self.live_user(decoded.claims.user_id).await
    }

    /// Trades a refresh token for a fresh pair built from the user's current record.
    ///
    /// The presented refresh token stays valid until it expires.
    #[instrument(skip_all)]
    pub async fn renew_pair(&self, refresh_token: &str) -> ServiceResult<TokenPair> {
        let decoded = self
            .codec
            .decode_as::<RefreshTokenClaims>(refresh_token)
            .map_err(|e| {
                debug!(error = %e, "Rejected refresh token");
                ServiceError::Unauthenticated
            })?;

        let user = self.live_user(decoded.claims.user_id).await?;
        let pair = self.issue_pair(&user)?;

        info!(user_id = %user.user_id, "Token pair renewed");
        Ok(pair)
    }

    #[instrument(skip(self, plaintext))]
    pub async fn login(&self, identifier: &str, plaintext: &str) -> ServiceResult<TokenPair> {
        let user = self
            .authenticate(identifier, plaintext)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        let pair = self.issue_pair(&user)?;

        info!(user_id = %user.user_id, "User logged in");
        Ok(pair)
    }

    async fn live_user(&self, user_id: UserId) -> ServiceResult<User> {
        match self.store.find_by_id(user_id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => {
                debug!(%user_id, "Token subject is inactive");
                Err(ServiceError::Unauthenticated)
            }
            None => {
                debug!(%user_id, "Token subject no longer exists");
                Err(ServiceError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_config::JwtConfig;
    use warden_core::SystemClock;
    use warden_db::MemoryUserStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryUserStore::new()),
            &JwtConfig::from_vars(|_| None),
            PasswordHasher::new(4),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn test_dummy_digest_is_real_bcrypt_at_configured_cost() {
        let service = service();

        assert!(service.dummy_digest.starts_with("$2b$04$"));
        assert!(service.hasher.verify(DUMMY_PASSWORD, &service.dummy_digest).unwrap());
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_none() {
        let service = service();
        let result = service.authenticate("nobody", "pw").await.unwrap();
        assert!(result.is_none());
    }
}

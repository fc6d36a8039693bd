use std::sync::Arc;

use warden_config::{CorsConfig, JwtConfig, PasswordConfig};
use warden_core::{Clock, PasswordHasher, SystemClock};
use warden_db::{PgPool, PgUserStore, UserStore};

use crate::modules::auth::service::AuthService;
use crate::modules::users::service::UserService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Wires both services onto one shared store.
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_config: &JwtConfig,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            auth_service: AuthService::new(store.clone(), jwt_config, hasher, clock),
            user_service: UserService::new(store, hasher),
            cors_config,
        }
    }
}

/// Production wiring: Postgres store, wall clock, settings from the environment.
pub fn init_app_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgUserStore::new(pool)),
        &JwtConfig::from_env(),
        PasswordHasher::new(PasswordConfig::from_env().bcrypt_cost),
        Arc::new(SystemClock),
        CorsConfig::from_env(),
    )
}

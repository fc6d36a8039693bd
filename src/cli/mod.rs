//! Administrative commands behind the `warden-cli` binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use validator::Validate;
use warden_config::PasswordConfig;
use warden_core::PasswordHasher;
use warden_db::{PgPool, PgUserStore, UserStore};
use warden_models::User;

use crate::modules::users::model::CreateUserDto;
use crate::modules::users::service::UserService;

/// Applies the embedded migrations.
pub async fn run_migrations(db: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("Failed to run database migrations")
}

/// Creates a superadmin in the Postgres store.
pub async fn create_superadmin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.clone()));
    let hasher = PasswordHasher::new(PasswordConfig::from_env().bcrypt_cost);

    create_superadmin_in(store, hasher, username, email, password).await
}

/// Same as [`create_superadmin`] against any store, applying the registration
/// validation rules first.
pub async fn create_superadmin_in(
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let dto = CreateUserDto {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    dto.validate().context("Invalid superadmin details")?;

    let user = UserService::new(store, hasher)
        .create_superadmin(dto)
        .await
        .context("Failed to create superadmin")?;

    Ok(user)
}

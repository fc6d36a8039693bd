//! Postgres-backed [`UserStore`].

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use warden_models::{NewUser, UpdatePredicate, User, UserChanges, UserId};

use crate::store::{StoreError, StoreResult, UserStore};

const USER_COLUMNS: &str = "user_id, username, email, hashed_password, is_active, role";

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Unique violations become [`StoreError::Conflict`] naming the offending column.
fn write_error(err: sqlx::Error, context: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        let field = match db_err.constraint() {
            Some(c) if c.contains("email") => "email",
            Some(c) if c.contains("username") => "username",
            _ => "user",
        };
        return StoreError::Conflict(field.to_string());
    }

    StoreError::Backend(anyhow::Error::new(err).context(context))
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_email_or_username(&self, identifier: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE email = $1 OR username = $1
             ORDER BY (email = $1) DESC
             LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email or username")?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, hashed_password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to insert user"))
    }

    #[instrument(skip(self))]
    async fn conditional_update(
        &self,
        user_id: UserId,
        predicate: UpdatePredicate,
        changes: UserChanges,
    ) -> StoreResult<Option<UserId>> {
        if changes.is_empty() {
            return Ok(None);
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut set = query.separated(", ");
        if let Some(username) = changes.username {
            set.push("username = ").push_bind_unseparated(username);
        }
        if let Some(email) = changes.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(role) = changes.role {
            set.push("role = ").push_bind_unseparated(role);
        }
        set.push("updated_at = NOW()");

        query
            .push(" WHERE user_id = ")
            .push_bind(user_id)
            .push(" AND is_active = true");
        if let Some(role) = predicate.role {
            query.push(" AND role = ").push_bind(role);
        }
        query.push(" RETURNING user_id");

        query
            .build_query_scalar::<UserId>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update user"))
    }

    #[instrument(skip(self))]
    async fn conditional_deactivate(&self, user_id: UserId) -> StoreResult<Option<UserId>> {
        let deactivated = sqlx::query_scalar::<_, UserId>(
            "UPDATE users SET is_active = false, updated_at = NOW()
             WHERE user_id = $1 AND is_active = true
             RETURNING user_id",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to deactivate user")?;

        Ok(deactivated)
    }
}

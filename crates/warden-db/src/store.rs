//! The user store contract.

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;
use warden_core::ServiceError;
use warden_models::{NewUser, UpdatePredicate, User, UserChanges, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint (username or email) rejected the write.
    #[error("{0} already exists")]
    Conflict(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(field) => {
                ServiceError::Conflict(format!("A user with this {field} already exists"))
            }
            StoreError::Backend(source) => ServiceError::Internal(source),
        }
    }
}

/// Persistence for users.
///
/// Lookups return inactive users too; callers decide what `is_active = false` means
/// for them. Writes are single conditional statements, so two racing writers can never
/// both observe success.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Matches `identifier` against the email first, then the username.
    async fn find_by_email_or_username(&self, identifier: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Inserts an active user and returns the stored row.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    /// Applies `changes` only if the row is active and matches `predicate`.
    ///
    /// Returns `None` when no row matched. Empty `changes` never reach the backend
    /// and also return `None`.
    async fn conditional_update(
        &self,
        user_id: UserId,
        predicate: UpdatePredicate,
        changes: UserChanges,
    ) -> StoreResult<Option<UserId>>;

    /// Flips `is_active` to false if it is currently true.
    async fn conditional_deactivate(&self, user_id: UserId) -> StoreResult<Option<UserId>>;
}

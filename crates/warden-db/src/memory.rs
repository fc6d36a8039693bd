//! In-process [`UserStore`] used by tests.
//!
//! Enforces the same uniqueness rules as the `users` table: username and email are
//! unique across active and inactive rows alike. Each write holds the lock for its
//! whole check-and-set, which gives the same single-winner behaviour as the
//! conditional statements in Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_models::{NewUser, UpdatePredicate, User, UserChanges, UserId};

use crate::store::{StoreError, StoreResult, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(
    users: &HashMap<UserId, User>,
    except: Option<UserId>,
    username: Option<&str>,
    email: Option<&str>,
) -> StoreResult<()> {
    for other in users.values().filter(|u| Some(u.user_id) != except) {
        if username.is_some_and(|name| other.username == name) {
            return Err(StoreError::Conflict("username".into()));
        }
        if email.is_some_and(|email| other.email == email) {
            return Err(StoreError::Conflict("email".into()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email_or_username(&self, identifier: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        let by_email = users.values().find(|u| u.email == identifier);
        let found = by_email.or_else(|| users.values().find(|u| u.username == identifier));
        Ok(found.cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        check_unique(
            &users,
            None,
            Some(&user.username),
            Some(user.email.as_str()),
        )?;

        let stored = User {
            user_id: UserId::new(),
            username: user.username,
            email: user.email,
            hashed_password: user.hashed_password,
            is_active: true,
            role: user.role,
        };
        users.insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn conditional_update(
        &self,
        user_id: UserId,
        predicate: UpdatePredicate,
        changes: UserChanges,
    ) -> StoreResult<Option<UserId>> {
        if changes.is_empty() {
            return Ok(None);
        }

        let mut users = self.users.write().await;
        if !users.get(&user_id).is_some_and(|u| predicate.matches(u)) {
            return Ok(None);
        }

        check_unique(
            &users,
            Some(user_id),
            changes.username.as_deref(),
            changes.email.as_ref().map(|e| e.as_str()),
        )?;

        let Some(user) = users.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        Ok(Some(user_id))
    }

    async fn conditional_deactivate(&self, user_id: UserId) -> StoreResult<Option<UserId>> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) if user.is_active => {
                user.is_active = false;
                Ok(Some(user_id))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_models::{Email, Role};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: Email::new_unchecked(email),
            hashed_password: "digest".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_activates() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("alice", "alice@x.com")).await.unwrap();

        assert!(user.is_active);
        assert_eq!(user.role, Role::User);
        assert_eq!(store.find_by_id(user.user_id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates_even_when_inactive() {
        let store = MemoryUserStore::new();
        let alice = store.insert(new_user("alice", "alice@x.com")).await.unwrap();
        store.conditional_deactivate(alice.user_id).await.unwrap();

        let err = store
            .insert(new_user("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(field) if field == "username"));

        let err = store
            .insert(new_user("bob", "alice@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(field) if field == "email"));
    }

    #[tokio::test]
    async fn test_find_by_email_or_username() {
        let store = MemoryUserStore::new();
        let alice = store.insert(new_user("alice", "alice@x.com")).await.unwrap();

        let by_email = store.find_by_email_or_username("alice@x.com").await.unwrap();
        let by_name = store.find_by_email_or_username("alice").await.unwrap();
        assert_eq!(by_email.map(|u| u.user_id), Some(alice.user_id));
        assert_eq!(by_name.map(|u| u.user_id), Some(alice.user_id));
        assert!(store.find_by_email_or_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conditional_update_respects_predicate() {
        let store = MemoryUserStore::new();
        let alice = store.insert(new_user("alice", "alice@x.com")).await.unwrap();

        let wrong_role = store
            .conditional_update(
                alice.user_id,
                UpdatePredicate::active_with_role(Role::Admin),
                UserChanges::role(Role::User),
            )
            .await
            .unwrap();
        assert_eq!(wrong_role, None);

        let promoted = store
            .conditional_update(
                alice.user_id,
                UpdatePredicate::active_with_role(Role::User),
                UserChanges::role(Role::Admin),
            )
            .await
            .unwrap();
        assert_eq!(promoted, Some(alice.user_id));

        let stored = store.find_by_id(alice.user_id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_conditional_update_uniqueness_excludes_self() {
        let store = MemoryUserStore::new();
        let alice = store.insert(new_user("alice", "alice@x.com")).await.unwrap();
        store.insert(new_user("bob", "bob@x.com")).await.unwrap();

        let same_name = UserChanges {
            username: Some("alice".into()),
            ..UserChanges::default()
        };
        let updated = store
            .conditional_update(alice.user_id, UpdatePredicate::active(), same_name)
            .await
            .unwrap();
        assert_eq!(updated, Some(alice.user_id));

        let taken = UserChanges {
            email: Some(Email::new_unchecked("bob@x.com")),
            ..UserChanges::default()
        };
        let err = store
            .conditional_update(alice.user_id, UpdatePredicate::active(), taken)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_conditional_deactivate_has_one_winner() {
        let store = MemoryUserStore::new();
        let alice = store.insert(new_user("alice", "alice@x.com")).await.unwrap();

        let (first, second) = tokio::join!(
            store.conditional_deactivate(alice.user_id),
            store.conditional_deactivate(alice.user_id)
        );
        let winners = [first.unwrap(), second.unwrap()]
            .into_iter()
            .flatten()
            .count();
        assert_eq!(winners, 1);

        let updated = store
            .conditional_update(
                alice.user_id,
                UpdatePredicate::active(),
                UserChanges::role(Role::Admin),
            )
            .await
            .unwrap();
        assert_eq!(updated, None);
    }
}

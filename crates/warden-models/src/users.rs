//! User record and the write-side shapes the store understands.
//!
//! # Roles
//!
//! A user holds exactly one [`Role`]. The three tiers are discrete: there is no
//! ordering between them, and every permission decision names the tiers it admits.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::UserId;
use crate::value_types::Email;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Superadmin,
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "SUPERADMIN",
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user, including the password digest.
///
/// Not serializable on purpose: HTTP responses go through dedicated DTOs so the
/// digest can never leak.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: Email,
    pub hashed_password: String,
    pub is_active: bool,
    pub role: Role,
}

impl User {
    pub fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Everything needed to insert a user. The store assigns the id and marks it active.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub hashed_password: String,
    pub role: Role,
}

/// Column changes for a conditional update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<Email>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }
}

/// Extra conditions a conditional update must match on top of
/// `user_id = $id AND is_active = true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdatePredicate {
    /// Only update if the row currently holds this role.
    pub role: Option<Role>,
}

impl UpdatePredicate {
    pub fn active() -> Self {
        Self::default()
    }

    pub fn active_with_role(role: Role) -> Self {
        Self { role: Some(role) }
    }

    pub fn matches(&self, user: &User) -> bool {
        user.is_active && self.role.is_none_or(|role| role == user.role)
    }
}

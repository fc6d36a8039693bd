//! # Warden Models
//!
//! Domain types shared by the store, the token codec and the services.
//!
//! - [`ids`]: the strongly-typed [`UserId`]
//! - [`value_types`]: the validated [`Email`]
//! - [`users`]: the [`User`] record, its [`Role`] and the write-side shapes
//!   ([`NewUser`], [`UserChanges`], [`UpdatePredicate`]) understood by the store

pub mod ids;
pub mod users;
pub mod value_types;

pub use ids::UserId;
pub use users::{NewUser, Role, UpdatePredicate, User, UserChanges};
pub use value_types::{Email, ValueTypeError};

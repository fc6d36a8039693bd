//! # Warden Core
//!
//! Core types shared by every Warden crate:
//!
//! - [`errors`]: the internal [`ServiceError`] taxonomy and its HTTP translation, [`AppError`]
//! - [`password`]: salted bcrypt hashing through [`PasswordHasher`]
//! - [`clock`]: an injectable time source so token expiry can be tested deterministically
//!
//! # Example
//!
//! ```ignore
//! use warden_core::{PasswordHasher, ServiceError};
//!
//! let hasher = PasswordHasher::default();
//! let digest = hasher.hash("correct horse")?;
//! assert!(hasher.verify("correct horse", &digest)?);
//! ```

pub mod clock;
pub mod errors;
pub mod password;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{AppError, ServiceError, ServiceResult};
pub use password::PasswordHasher;

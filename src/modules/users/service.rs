use std::sync::Arc;

use tracing::{info, instrument};
use warden_auth::{UserAction, ensure_can_modify};
use warden_core::{PasswordHasher, ServiceError, ServiceResult};
use warden_db::UserStore;
use warden_models::{Email, NewUser, Role, UpdatePredicate, User, UserChanges, UserId};

use super::model::{CreateUserDto, UpdateUserDto};

fn user_not_found(user_id: UserId) -> ServiceError {
    ServiceError::not_found(format!("User with id {user_id} not found"))
}

fn parse_email(email: String) -> ServiceResult<Email> {
    Email::new(email).map_err(|e| ServiceError::validation(e.to_string()))
}

/// User registration and every mutation of an existing user.
///
/// Each mutation loads the target, asks the authorization policy, then performs one
/// conditional write guarded on `is_active` (and, for privilege changes, on the role
/// the target was seen with). A request that loses a race sees no row and reports
/// `NotFound` or `Conflict` instead of overwriting.
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Registers an active user with the `USER` role.
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn create(&self, dto: CreateUserDto) -> ServiceResult<User> {
        self.register(dto, Role::User).await
    }

    /// Registers an active superadmin. Only the administrative CLI calls this.
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn create_superadmin(&self, dto: CreateUserDto) -> ServiceResult<User> {
        self.register(dto, Role::Superadmin).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId) -> ServiceResult<User> {
        self.active_user(user_id).await
    }

    #[instrument(skip(self, actor, dto), fields(actor_id = %actor.user_id))]
    pub async fn update(
        &self,
        actor: &User,
        user_id: UserId,
        dto: UpdateUserDto,
    ) -> ServiceResult<UserId> {
        let changes = UserChanges {
            username: dto.username,
            email: dto.email.map(parse_email).transpose()?,
            role: None,
        };

        if changes.is_empty() {
            return Err(ServiceError::validation(
                "At least one parameter for user update info should be provided",
            ));
        }

        let target = self.active_user(user_id).await?;
        if actor.user_id != target.user_id {
            ensure_can_modify(actor, &target, UserAction::Update)?;
        }

        let updated = self
            .store
            .conditional_update(user_id, UpdatePredicate::active(), changes)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        info!(%user_id, "User updated");
        Ok(updated)
    }

    /// Soft-deletes the target by clearing `is_active`.
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id))]
    pub async fn delete(&self, actor: &User, user_id: UserId) -> ServiceResult<UserId> {
        let target = self.active_user(user_id).await?;
        ensure_can_modify(actor, &target, UserAction::Delete)?;

        let deleted = self
            .store
            .conditional_deactivate(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        info!(%user_id, "User deactivated");
        Ok(deleted)
    }

    /// Grants `ADMIN` to a plain user.
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id))]
    pub async fn promote(&self, actor: &User, user_id: UserId) -> ServiceResult<UserId> {
        ensure_manages_privileges(actor, user_id)?;

        let target = self.active_user(user_id).await?;
        if target.role != Role::User {
            return Err(already_promoted(user_id));
        }
        ensure_can_modify(actor, &target, UserAction::Promote)?;

        let promoted = self
            .set_role(user_id, Role::User, Role::Admin)
            .await?
            .ok_or_else(|| already_promoted(user_id))?;

        info!(%user_id, "Admin privileges granted");
        Ok(promoted)
    }

    /// Takes `ADMIN` away, leaving a plain user.
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id))]
    pub async fn demote(&self, actor: &User, user_id: UserId) -> ServiceResult<UserId> {
        ensure_manages_privileges(actor, user_id)?;

        let target = self.active_user(user_id).await?;
        if target.role != Role::Admin {
            return Err(not_an_admin(user_id));
        }
        ensure_can_modify(actor, &target, UserAction::Demote)?;

        let demoted = self
            .set_role(user_id, Role::Admin, Role::User)
            .await?
            .ok_or_else(|| not_an_admin(user_id))?;

        info!(%user_id, "Admin privileges revoked");
        Ok(demoted)
    }

    async fn register(&self, dto: CreateUserDto, role: Role) -> ServiceResult<User> {
        let email = parse_email(dto.email)?;
        let hashed_password = self.hasher.hash(&dto.password)?;

        let user = self
            .store
            .insert(NewUser {
                username: dto.username,
                email,
                hashed_password,
                role,
            })
            .await?;

        info!(user_id = %user.user_id, %role, "User created");
        Ok(user)
    }

    async fn active_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.store
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Swaps `expected` for `role` in one conditional write.
    ///
    /// `Ok(None)` means the row is still active but no longer holds `expected`. A
    /// target that vanished or was deactivated in the meantime is `NotFound`.
    async fn set_role(
        &self,
        user_id: UserId,
        expected: Role,
        role: Role,
    ) -> ServiceResult<Option<UserId>> {
        let updated = self
            .store
            .conditional_update(
                user_id,
                UpdatePredicate::active_with_role(expected),
                UserChanges::role(role),
            )
            .await?;

        if updated.is_none() {
            self.active_user(user_id).await?;
        }

        Ok(updated)
    }
}

/// Privilege changes need a superadmin acting on someone else. Checked before the
/// store is touched.
fn ensure_manages_privileges(actor: &User, user_id: UserId) -> ServiceResult<()> {
    if !actor.is_superadmin() {
        return Err(ServiceError::Forbidden);
    }
    if actor.user_id == user_id {
        return Err(ServiceError::validation("Cannot manage privileges of itself"));
    }
    Ok(())
}

fn already_promoted(user_id: UserId) -> ServiceError {
    ServiceError::conflict(format!(
        "User with id {user_id} already promoted to admin / superadmin"
    ))
}

fn not_an_admin(user_id: UserId) -> ServiceError {
    ServiceError::conflict(format!("User with id {user_id} has no admin privileges"))
}

//! Who may modify whom.
//!
//! [`can_modify`] answers entitlement only. Whether a change is a no-op (promoting an
//! existing admin, say) is the caller's concern.
//!
//! Rules, first match wins:
//!
//! | # | Condition | Update | Delete | Promote / Demote |
//! |---|-----------|--------|--------|------------------|
//! | 1 | target is superadmin | only self | no | no |
//! | 2 | actor is target | yes | yes | no |
//! | 3 | another user, privilege change | - | - | superadmin only |
//! | 4 | another user, update/delete | superadmin; admin on users | same as update | - |

use warden_core::ServiceError;
use warden_models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    Update,
    Delete,
    Promote,
    Demote,
}

impl UserAction {
    fn changes_privilege(self) -> bool {
        matches!(self, Self::Promote | Self::Demote)
    }
}

pub fn can_modify(actor: &User, target: &User, action: UserAction) -> bool {
    let is_self = actor.user_id == target.user_id;

    if target.is_superadmin() {
        return action == UserAction::Update && is_self;
    }

    if is_self {
        return !action.changes_privilege();
    }

    if action.changes_privilege() {
        return actor.is_superadmin();
    }

    match actor.role {
        Role::Superadmin => true,
        Role::Admin => target.role == Role::User,
        Role::User => false,
    }
}

/// [`can_modify`] as a guard.
pub fn ensure_can_modify(
    actor: &User,
    target: &User,
    action: UserAction,
) -> Result<(), ServiceError> {
    if can_modify(actor, target, action) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_models::{Email, UserId};

    use UserAction::*;

    fn user(role: Role) -> User {
        User {
            user_id: UserId::new(),
            username: format!("{}-user", role.as_str().to_lowercase()),
            email: Email::new_unchecked(format!("{}@x.com", role.as_str().to_lowercase())),
            hashed_password: "digest".to_string(),
            is_active: true,
            role,
        }
    }

    const ALL: [UserAction; 4] = [Update, Delete, Promote, Demote];

    #[test]
    fn test_superadmin_target_is_protected() {
        let target = user(Role::Superadmin);
        for actor_role in [Role::Superadmin, Role::Admin, Role::User] {
            let actor = user(actor_role);
            for action in ALL {
                assert!(!can_modify(&actor, &target, action), "{actor_role} {action:?}");
            }
        }
    }

    #[test]
    fn test_superadmin_may_only_update_self() {
        let me = user(Role::Superadmin);
        assert!(can_modify(&me, &me, Update));
        assert!(!can_modify(&me, &me, Delete));
        assert!(!can_modify(&me, &me, Promote));
        assert!(!can_modify(&me, &me, Demote));
    }

    #[test]
    fn test_self_update_and_delete_but_no_privilege_change() {
        for role in [Role::Admin, Role::User] {
            let me = user(role);
            assert!(can_modify(&me, &me, Update));
            assert!(can_modify(&me, &me, Delete));
            assert!(!can_modify(&me, &me, Promote));
            assert!(!can_modify(&me, &me, Demote));
        }
    }

    #[test]
    fn test_privilege_changes_need_superadmin() {
        let superadmin = user(Role::Superadmin);
        let admin = user(Role::Admin);
        let other_admin = user(Role::Admin);
        let plain = user(Role::User);

        assert!(can_modify(&superadmin, &plain, Promote));
        assert!(can_modify(&superadmin, &admin, Demote));
        // No-op detection is not the engine's job.
        assert!(can_modify(&superadmin, &admin, Promote));

        assert!(!can_modify(&admin, &plain, Promote));
        assert!(!can_modify(&admin, &other_admin, Demote));
        assert!(!can_modify(&plain, &admin, Demote));
    }

    #[test]
    fn test_update_and_delete_of_others() {
        let superadmin = user(Role::Superadmin);
        let admin = user(Role::Admin);
        let other_admin = user(Role::Admin);
        let plain = user(Role::User);
        let other_plain = user(Role::User);

        for action in [Update, Delete] {
            assert!(can_modify(&superadmin, &admin, action));
            assert!(can_modify(&superadmin, &plain, action));

            assert!(can_modify(&admin, &plain, action));
            assert!(!can_modify(&admin, &other_admin, action));

            assert!(!can_modify(&plain, &other_plain, action));
            assert!(!can_modify(&plain, &admin, action));
        }
    }

    #[test]
    fn test_ensure_can_modify() {
        let admin = user(Role::Admin);
        let plain = user(Role::User);

        assert!(ensure_can_modify(&admin, &plain, Delete).is_ok());
        assert!(matches!(
            ensure_can_modify(&plain, &admin, Delete),
            Err(ServiceError::Forbidden)
        ));
    }
}

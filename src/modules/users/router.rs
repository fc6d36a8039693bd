use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_user, delete_user, get_me, get_user, grant_admin_privilege, revoke_admin_privilege,
    update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/me", get(get_me))
        .route(
            "/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route(
            "/{user_id}/admin-privilege",
            patch(grant_admin_privilege).delete(revoke_admin_privilege),
        )
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use warden_core::AppError;
use warden_models::UserId;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::model::{CreateUserDto, DeletedUserResponse, ShowUser, UpdateUserDto, UpdatedUserResponse};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ShowUser),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ShowUser>), AppError> {
    let user = state.user_service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = ShowUser),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_me(AuthUser(actor): AuthUser) -> Json<ShowUser> {
    Json(actor.into())
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = ShowUser),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found or inactive", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(user_id): ValidatedPath<UserId>,
) -> Result<Json<ShowUser>, AppError> {
    let user = state.user_service.get(user_id).await?;
    Ok(Json(user.into()))
}

/// Update a user's profile
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UpdatedUserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Not allowed to modify this user", body = ErrorResponse),
        (status = 404, description = "User not found or inactive", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 422, description = "Validation error or nothing to update", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, actor, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedPath(user_id): ValidatedPath<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UpdatedUserResponse>, AppError> {
    let updated_user_id = state.user_service.update(&actor, user_id, dto).await?;
    Ok(Json(UpdatedUserResponse { updated_user_id }))
}

/// Deactivate a user
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated", body = DeletedUserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Not allowed to delete this user", body = ErrorResponse),
        (status = 404, description = "User not found or inactive", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, actor))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedPath(user_id): ValidatedPath<UserId>,
) -> Result<Json<DeletedUserResponse>, AppError> {
    let deleted_user_id = state.user_service.delete(&actor, user_id).await?;
    Ok(Json(DeletedUserResponse { deleted_user_id }))
}

/// Grant admin privileges (superadmin only)
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}/admin-privilege",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User promoted to admin", body = UpdatedUserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Actor is not a superadmin", body = ErrorResponse),
        (status = 404, description = "User not found or inactive", body = ErrorResponse),
        (status = 409, description = "User is already an admin or superadmin", body = ErrorResponse),
        (status = 422, description = "Actor targeted itself", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, actor))]
pub async fn grant_admin_privilege(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedPath(user_id): ValidatedPath<UserId>,
) -> Result<Json<UpdatedUserResponse>, AppError> {
    let updated_user_id = state.user_service.promote(&actor, user_id).await?;
    Ok(Json(UpdatedUserResponse { updated_user_id }))
}

/// Revoke admin privileges (superadmin only)
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/admin-privilege",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Admin demoted to user", body = UpdatedUserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Actor is not a superadmin", body = ErrorResponse),
        (status = 404, description = "User not found or inactive", body = ErrorResponse),
        (status = 409, description = "User has no admin privileges", body = ErrorResponse),
        (status = 422, description = "Actor targeted itself", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, actor))]
pub async fn revoke_admin_privilege(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedPath(user_id): ValidatedPath<UserId>,
) -> Result<Json<UpdatedUserResponse>, AppError> {
    let updated_user_id = state.user_service.demote(&actor, user_id).await?;
    Ok(Json(UpdatedUserResponse { updated_user_id }))
}

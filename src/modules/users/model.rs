use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use warden_models::{Email, Role, User, UserId};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Profile fields a user (or an entitled admin) may change. Omitted fields stay as
/// they are; the role is never changed here.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShowUser {
    pub user_id: UserId,
    pub username: String,
    pub email: Email,
    pub is_active: bool,
    pub role: Role,
}

impl From<User> for ShowUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedUserResponse {
    pub updated_user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedUserResponse {
    pub deleted_user_id: UserId,
}

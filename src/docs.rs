use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use warden_models::Role;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RefreshTokenRequest, TokenResponse};
use crate::modules::users::model::{
    CreateUserDto, DeletedUserResponse, ShowUser, UpdateUserDto, UpdatedUserResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::grant_admin_privilege,
        crate::modules::users::controller::revoke_admin_privilege,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            CreateUserDto,
            UpdateUserDto,
            ShowUser,
            UpdatedUserResponse,
            DeletedUserResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token renewal"),
        (name = "Users", description = "User registration, profile and privilege management")
    ),
    info(
        title = "Warden API",
        version = "0.1.0",
        description = "Authentication and user management with JWT access/refresh token pairs and a three-tier role model.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

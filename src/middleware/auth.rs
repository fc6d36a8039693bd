use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use warden_core::AppError;
use warden_models::User;

use crate::state::AppState;

/// Extractor that resolves the bearer token to the live, active user.
///
/// Every failure (missing header, wrong scheme, bad or expired token, deactivated
/// user) rejects with the same 401 body.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::unauthorized)?;

        let user = state.auth_service.resolve_actor(token).await?;

        Ok(AuthUser(user))
    }
}

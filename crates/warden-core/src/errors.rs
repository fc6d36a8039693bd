//! Error types for the Warden service.
//!
//! Business logic speaks [`ServiceError`]; handlers return [`AppError`], which is the
//! only place an error kind is mapped to an HTTP status. Authentication and
//! authorization failures are deliberately generic on the wire.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const UNAUTHENTICATED_MESSAGE: &str = "Could not validate credentials";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

/// Error kinds produced by the authentication and user lifecycle services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing input. Caller's fault, do not retry.
    #[error("{0}")]
    Validation(String),

    /// No valid actor could be resolved. The caller must re-authenticate.
    #[error("Could not validate credentials")]
    Unauthenticated,

    /// The actor is known but not entitled to the operation.
    #[error("Forbidden")]
    Forbidden,

    /// The target does not exist or is no longer active.
    #[error("{0}")]
    NotFound(String),

    /// The operation is a no-op or violates a uniqueness constraint.
    #[error("{0}")]
    Conflict(String),

    /// The token was well formed and signed, but its `exp` has passed.
    #[error("Token has expired")]
    TokenExpired,

    /// The token could not be verified or is missing required claims.
    #[error("Token is invalid")]
    TokenInvalid,

    /// Signing a token failed.
    #[error("Failed to issue token: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(anyhow::anyhow!(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TokenIssuance(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP-facing error: a status code plus the message rendered into the JSON body.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: anyhow::Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            anyhow::anyhow!(UNAUTHENTICATED_MESSAGE),
        )
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        match err {
            ServiceError::Internal(source) => {
                tracing::error!(error = ?source, "Internal error");
                Self::new(status, anyhow::anyhow!("Internal server error"))
            }
            ServiceError::TokenIssuance(reason) => {
                tracing::error!(%reason, "Token issuance failed");
                Self::new(status, anyhow::anyhow!("Internal server error"))
            }
            other => Self::new(status, anyhow::anyhow!(other.to_string())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::validation("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::Unauthenticated.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ServiceError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::TokenInvalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::TokenIssuance("bad alg".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_message_is_uniform() {
        let app_error = AppError::from(ServiceError::Forbidden);
        assert_eq!(app_error.status, StatusCode::FORBIDDEN);
        assert_eq!(app_error.error.to_string(), "Forbidden");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app_error = AppError::from(ServiceError::internal("connection refused on 5432"));
        assert_eq!(app_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app_error.error.to_string(), "Internal server error");
    }

    #[test]
    fn test_unauthenticated_message_is_generic() {
        let app_error = AppError::from(ServiceError::Unauthenticated);
        assert_eq!(app_error.error.to_string(), UNAUTHENTICATED_MESSAGE);
    }
}

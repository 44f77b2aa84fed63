//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every error renders as a JSON
//! body of the form `{"detail": "..."}`. Server-side failures are captured to
//! Sentry and their details are never shown to clients.

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use corner_store_core::{EmailError, PriceError};

use crate::services::{AuthError, ServiceError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Credentials were rejected.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request parameters are missing or malformed.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Service(ServiceError::Repository(_)) | Self::Auth(AuthError::Repository(_))
        )
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceError::ItemNotFound(_) | ServiceError::ItemNotInCart(_) => {
                    StatusCode::NOT_FOUND
                }
                ServiceError::CartIsEmpty => StatusCode::PRECONDITION_REQUIRED,
                ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
                AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn detail(&self) -> String {
        if self.is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Service(ServiceError::ItemNotFound(_)) => "item not found".to_string(),
            Self::Service(ServiceError::ItemNotInCart(_)) => "item not in cart".to_string(),
            Self::Service(ServiceError::CartIsEmpty) => "cart is empty".to_string(),
            Self::Auth(AuthError::InvalidCredentials) => "Unauthorized user".to_string(),
            Self::Auth(AuthError::Forbidden { .. }) => "Forbidden resource".to_string(),
            Self::Unprocessable(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        Self::Unprocessable(format!("invalid email: {err}"))
    }
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        Self::Unprocessable(format!("invalid price: {err}"))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the caller of a privileged request.
pub fn set_sentry_user(user_id: &impl ToString, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_store_core::{ItemId, Role};

    use super::*;
    use crate::db::RepositoryError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_detail(err: AppError) -> String {
        let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["detail"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(ServiceError::ItemNotFound(ItemId::new_v4()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ServiceError::CartIsEmpty.into()),
            StatusCode::PRECONDITION_REQUIRED
        );
        assert_eq!(
            get_status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(
                AuthError::Forbidden {
                    required: Role::Admin
                }
                .into()
            ),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(EmailError::AtSymbol.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(
                AuthError::Repository(RepositoryError::DataCorruption("x".to_owned())).into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_details() {
        assert_eq!(
            get_detail(AuthError::InvalidCredentials.into()).await,
            "Unauthorized user"
        );
        assert_eq!(
            get_detail(
                AuthError::Forbidden {
                    required: Role::Manager
                }
                .into()
            )
            .await,
            "Forbidden resource"
        );
        assert_eq!(
            get_detail(ServiceError::CartIsEmpty.into()).await,
            "cart is empty"
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let err = ServiceError::Repository(RepositoryError::DataCorruption(
            "secret table layout".to_string(),
        ));
        assert_eq!(get_detail(err.into()).await, "Internal server error");
    }
}

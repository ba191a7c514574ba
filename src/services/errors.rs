use crate::api::response::ActionResponse;
use crate::data::errors::DataError;
use crate::security::errors::AuthError;
use crate::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failure of an action. Only the message reaches the caller; the
/// underlying error is logged where it is converted.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotConfigured(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upload(String),
    #[error("{0}")]
    Data(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Upload(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Data(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::NotConfigured(m)
            | ServiceError::Validation(m)
            | ServiceError::Unauthorized(m)
            | ServiceError::NotFound(m)
            | ServiceError::Upload(m)
            | ServiceError::Data(m)
            | ServiceError::Internal(m) => m,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Logs a persistence failure and hides it behind `message`. Missing
    /// records surface as `NotFound` instead.
    pub fn data(message: &str, err: DataError) -> Self {
        if err.is_not_found() {
            tracing::warn!("{}: {}", message, err);
            return ServiceError::NotFound(err.to_string());
        }
        tracing::error!("{}: {}", message, err);
        ServiceError::Data(message.to_string())
    }

    /// Logs a storage failure, keeping its message for the caller.
    pub fn upload(context: &str, err: StorageError) -> Self {
        tracing::error!("{}: {}", context, err);
        match err {
            StorageError::NotConfigured(m) => ServiceError::NotConfigured(m),
            other => ServiceError::Upload(format!("{}: {}", context, other)),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenCreationError => {
                tracing::error!("Failed to sign admin token");
                ServiceError::Internal(err.to_string())
            }
            other => ServiceError::Unauthorized(other.to_string()),
        }
    }
}

impl From<ServiceError> for ActionResponse {
    fn from(err: ServiceError) -> Self {
        ActionResponse::failure(err.message())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), Json(ActionResponse::from(self))).into_response()
    }
}

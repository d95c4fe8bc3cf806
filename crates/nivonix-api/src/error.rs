use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use nivonix_auth::AuthError;
use nivonix_chat::TurnError;
use nivonix_llm::ProviderError;
use nivonix_persist::PersistError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid credential")]
    Unauthenticated,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Internal server error")]
    Internal,
}

impl From<TurnError> for ApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::BadRequest(msg) => ApiError::BadRequest(msg),
            TurnError::Provider(e) => ApiError::Provider(e),
            TurnError::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::ThreadNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Auth(ref e) => match e {
                AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, e.to_string())
                }
                AuthError::EmailTaken => (StatusCode::BAD_REQUEST, e.to_string()),
                AuthError::Federated(_) => (StatusCode::UNAUTHORIZED, e.to_string()),
                _ => {
                    tracing::error!("Auth error: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed".to_string())
                }
            },
            ApiError::Provider(ref e) => {
                tracing::error!("Provider error: {}", e);
                (StatusCode::BAD_GATEWAY, "Reply generation failed".to_string())
            }
            ApiError::StoreUnavailable(ref msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable".to_string())
            }
            // A thread missing for this owner is a 404 regardless of why.
            ApiError::Persist(PersistError::ThreadNotFound(ref id)) => {
                (StatusCode::NOT_FOUND, format!("Thread not found: {}", id))
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            ApiError::Internal => {
                tracing::error!("Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

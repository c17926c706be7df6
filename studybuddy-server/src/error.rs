use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Substituted whenever every provider is exhausted; the raw failure never
/// reaches the client.
pub const UNAVAILABLE_MESSAGE: &str =
    "⚠️ AI service temporarily unavailable. Please try again in a moment.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("missing or invalid user identity")]
    Unauthenticated,

    #[error("too many requests")]
    RateLimited,

    #[error("all AI providers are unavailable")]
    ProvidersUnavailable,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid user identity.".to_owned(),
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please retry shortly.".to_owned(),
            ),
            ApiError::ProvidersUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE.to_owned())
            }
            ApiError::Internal(inner) => {
                error!(error = ?inner, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

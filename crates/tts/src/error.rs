use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Synthesis service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum TtsError {
    /// Request failed validation (unsupported language, out-of-range ids, bad body)
    #[error("{0}")]
    InvalidRequest(String),

    /// Request body is not JSON
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Request body exceeds the size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The acoustic model was not initialized at startup
    #[error("{0}")]
    ModelUnavailable(String),

    /// Requested audio artifact does not exist
    #[error("{0}")]
    NotFound(String),

    /// Inference or artifact writing failed; the message is the raw cause
    #[error("{0}")]
    SynthesisFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error; details are logged, never returned
    #[error("Internal server error")]
    InternalError,
}

impl TtsError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SynthesisFailed(_) | Self::ConfigError(_) | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string for the response
    pub fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedMediaType(_) | Self::PayloadTooLarge(_) => {
                "invalid_request_error"
            }
            Self::ModelUnavailable(_) => "service_unavailable",
            Self::NotFound(_) => "not_found_error",
            Self::SynthesisFailed(_) | Self::ConfigError(_) | Self::InternalError => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Error body: a flat `detail` message plus the structured `error` object
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorResponse {
    detail: String,
    error: ErrorDetails,
}

#[derive(Debug, Serialize, ToSchema)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let message = self.client_message();

        let error_response = ErrorResponse {
            detail: message.clone(),
            error: ErrorDetails {
                message,
                r#type: self.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_status_codes() {
        assert_eq!(
            TtsError::InvalidRequest("Language xx not supported".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TtsError::ModelUnavailable("Model not loaded".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(TtsError::NotFound("gone".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            TtsError::SynthesisFailed("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn synthesis_failure_exposes_raw_cause() {
        let err = TtsError::SynthesisFailed("No space left on device (os error 28)".into());
        assert_eq!(err.client_message(), "No space left on device (os error 28)");
        assert_eq!(err.error_type(), "internal_error");
    }

    #[test]
    fn hidden_internal_error() {
        assert_eq!(TtsError::InternalError.client_message(), "Internal server error");
        assert_eq!(TtsError::InternalError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn response_body_shape() {
        let response = TtsError::InvalidRequest("accent_id must be 0-4".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["detail"], "accent_id must be 0-4");
        assert_eq!(body["error"]["message"], "accent_id must be 0-4");
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], 400);
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;
use widget_core::wire::ErrorBody;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Environment variable {key} must be set (copy .env.example to .env)")]
    MissingConfig { key: String },

    #[error("Environment variable {key} has invalid value '{value}'")]
    InvalidConfig { key: String, value: String },

    // ── AI Agent errors ──────────────────────────────────────────────────────
    #[error("{provider} service unavailable")]
    ProviderUnavailable { provider: String },

    #[error("Model '{model_name}' not found")]
    ModelNotFound { model_name: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("Assistant returned an empty reply")]
    EmptyReply,

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::FieldTooLong { .. })
    }

    pub fn is_agent_unavailable(&self) -> bool {
        matches!(self, AppError::ProviderUnavailable { .. })
    }

    pub fn is_agent_failure(&self) -> bool {
        matches!(
            self,
            AppError::ModelNotFound { .. } | AppError::InferenceError { .. } | AppError::EmptyReply
        )
    }

    pub fn status(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else if self.is_agent_unavailable() {
            StatusCode::SERVICE_UNAVAILABLE
        } else if self.is_agent_failure() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = AppError::EmptyField { field_name: "message".to_string() };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::FieldTooLong {
            field_name: "message".to_string(),
            max_length: 1,
            actual_length: 2,
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn agent_errors_map_to_gateway_statuses() {
        let unavailable = AppError::ProviderUnavailable { provider: "Gemini".to_string() };
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::EmptyReply.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::InferenceError { message: "boom".to_string() }.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn everything_else_is_internal() {
        let err = AppError::MissingConfig { key: "GEMINI_API_KEY".to_string() };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

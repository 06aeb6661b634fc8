use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;
use crate::congress::CongressApiError;
use crate::llm::LlmError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A mandatory upstream call (bill list or bill metadata) failed.
    #[error("Congress.gov API failed: {0}")]
    UpstreamFetch(#[from] CongressApiError),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("LLM processing error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFetch(_)
            | AppError::Store(_)
            | AppError::Llm(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::BadRequest(_) => tracing::debug!(error = %self, "rejected request"),
            _ => tracing::error!(error = %self, "request failed"),
        }

        response::error::<()>(status, self.to_string()).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failure_maps_to_server_error_with_cause() {
        let err = AppError::from(CongressApiError::ApiError {
            status: 503,
            message: "maintenance".to_string(),
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Congress.gov API failed: API error: 503 - maintenance"
        );
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("limit must be positive".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

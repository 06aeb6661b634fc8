use serde::{Deserialize, Serialize};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

/// Envelope for every JSON body the service returns.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

impl ResponseMeta {
    fn new(status: StatusCode, message: Option<String>) -> Self {
        Self {
            status: if status.is_success() { "success" } else { "error" }.to_string(),
            status_code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
            message,
        }
    }
}

/// Status and envelope together, ready to hand back from a handler.
pub struct Reply<T> {
    status: StatusCode,
    body: ApiResponse<T>,
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn success<T: Serialize>(data: T) -> Reply<T> {
    Reply {
        status: StatusCode::OK,
        body: ApiResponse {
            data: Some(data),
            meta: ResponseMeta::new(StatusCode::OK, None),
        },
    }
}

pub fn error<T>(status: StatusCode, message: String) -> Reply<T> {
    Reply {
        status,
        body: ApiResponse {
            data: None,
            meta: ResponseMeta::new(status, Some(message)),
        },
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::error::PropertyError;

/// `{"error": <status>, "text": <message>}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: u16,
    pub text: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            error: status.as_u16(),
            text: text.into(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for PropertyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                "Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        } else {
            tracing::info!("Request rejected: {}", self);
        }

        ErrorBody::new(status, self.to_string()).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures talking to the booking store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Network(String),

    /// The store answered with a 4xx/5xx, optionally carrying a JSON `error` field.
    #[error("Server returned {status}")]
    Status { status: u16, message: Option<String> },

    /// The body could not be decoded or lacked required data.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The store-provided `error` string, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Malformed(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

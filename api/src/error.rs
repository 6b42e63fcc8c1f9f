use axum::{
    Json,
    http::{StatusCode, Uri},
};
use serde::Serialize;
use tracing::warn;

/// Structured error body. `path` is omitted from the JSON when empty.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, path: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::new("Not Found", "The requested endpoint does not exist", path)
    }
}

/// Fallback for every path the router does not know, any method.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    warn!("404 error: {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found(uri.path())),
    )
}

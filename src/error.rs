//! Error types for extraction requests
//!
//! Every failure a processing operation can hit is normalized into
//! [`ExtractError`] and carried explicitly through the dispatcher; nothing
//! reaches the HTTP layer as an unhandled fault. There is no
//! transient/permanent split: every error is terminal for its request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified error type for the extraction pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Malformed request (missing body, missing source, invalid file-or-path shape)
    #[error("{0}")]
    BadRequest(String),

    /// Path validation failure (existence, file type, extension, readability)
    #[error("{0}")]
    Validation(String),

    /// Remote PDF fetch failed
    #[error("Failed to download PDF from URL: {0}")]
    Download(String),

    /// External tool exited non-zero
    #[error("Command failed with return code {code}: {stderr}")]
    ExternalTool { code: i32, stderr: String },

    /// Tool exited zero but produced no matching figure files
    #[error("No figures were generated.")]
    NoFigures,

    /// Subprocess exceeded the configured deadline
    #[error("External tool timed out after {0} seconds")]
    Timeout(u64),

    /// Metadata sidecar present but unparseable
    #[error("Failed to parse metadata file: {0}")]
    Metadata(String),

    /// Filesystem failure while preparing or scanning outputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

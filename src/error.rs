//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

/// Error definitions for the imagegen application.
#[derive(Debug)]
pub enum ImagegenError {
    /// The request itself was unusable, eg a missing prompt
    Validation(String),
    /// Style key that isn't one of the known styles
    UnknownStyle(String),
    /// Size string that isn't `WxH` with positive integers
    InvalidSize(String),
    /// The inference API call failed or was never attempted
    Inference {
        /// HTTP status from upstream, `None` when no response was received
        status: Option<u16>,
        /// Upstream response body or failure description
        body: String,
    },
    /// Upstream answered 200 but the body wasn't an image we could decode
    InvalidImage(String),
    /// Writing the generated image to disk failed
    Persistence(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl ImagegenError {
    /// True for the failures that are recovered by serving a fallback image.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownStyle(_)
                | Self::InvalidSize(_)
                | Self::Inference { .. }
                | Self::InvalidImage(_)
                | Self::Persistence(_)
        )
    }
}

impl std::fmt::Display for ImagegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::UnknownStyle(style) => write!(f, "Unknown style: {style}"),
            Self::InvalidSize(size) => write!(f, "Invalid image size: {size}"),
            Self::Inference {
                status: Some(status),
                body,
            } => write!(f, "API returned error {status}: {body}"),
            Self::Inference { status: None, body } => write!(f, "Inference failed: {body}"),
            Self::InvalidImage(message) => write!(f, "Invalid image payload: {message}"),
            Self::Persistence(message) => write!(f, "Failed to store image: {message}"),
            Self::InternalServerError(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ImagegenError {}

impl From<std::io::Error> for ImagegenError {
    fn from(err: std::io::Error) -> Self {
        ImagegenError::Persistence(err.to_string())
    }
}

impl From<reqwest::Error> for ImagegenError {
    fn from(err: reqwest::Error) -> Self {
        ImagegenError::Inference {
            status: err.status().map(|status| status.as_u16()),
            body: err.to_string(),
        }
    }
}

impl From<image::ImageError> for ImagegenError {
    fn from(err: image::ImageError) -> Self {
        ImagegenError::InvalidImage(err.to_string())
    }
}

impl IntoResponse for ImagegenError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ImagegenError::Validation(message) => {
                info!("Bad request received: {}", message);
                StatusCode::BAD_REQUEST
            }
            other => {
                tracing::error!("Error generating image: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

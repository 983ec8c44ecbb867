//! `POST /generate-image`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::constants::{DEFAULT_SIZE, DEFAULT_STYLE};
use crate::error::ImagegenError;
use crate::fallback;

/// Body of a generation request. Style and size are validated on the AI path,
/// so bad values end up with a fallback image rather than an error.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    #[serde(default)]
    pub(crate) prompt: Option<String>,
    #[serde(default)]
    pub(crate) style: Option<String>,
    #[serde(default)]
    pub(crate) size: Option<String>,
}

/// What the client gets back.
#[derive(Debug, Serialize)]
pub(crate) struct StoredImageRef {
    pub(crate) image_url: String,
    pub(crate) prompt: String,
    pub(crate) is_ai: bool,
}

pub(crate) async fn generate_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<StoredImageRef>, ImagegenError> {
    let Json(request) =
        payload.map_err(|rejection| ImagegenError::Validation(rejection.body_text()))?;

    let prompt = request.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(ImagegenError::Validation("Prompt is required".to_string()));
    }
    let style = request.style.as_deref().unwrap_or(DEFAULT_STYLE);
    let size = request.size.as_deref().unwrap_or(DEFAULT_SIZE);

    match state.generate_ai_image(&prompt, style, size).await {
        Ok(stored) => {
            info!("Successfully generated AI image: {}", stored.url);
            Ok(Json(StoredImageRef {
                image_url: stored.url,
                prompt,
                is_ai: true,
            }))
        }
        Err(err) if err.is_generation_failure() => {
            warn!("AI generation failed: {}", err);
            let image = fallback::resolve(&prompt);
            info!("Falling back to stock photo: {}", image.url());
            Ok(Json(StoredImageRef {
                image_url: image.into_url(),
                prompt,
                is_ai: false,
            }))
        }
        Err(err) => Err(err),
    }
}

//! Client for the hosted text-to-image inference API.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{ImageFormat, ImageReader};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::constants::{GUIDANCE_SCALE, NUM_INFERENCE_STEPS, SCHEDULER};
use crate::error::ImagegenError;
use crate::style::EnhancedPrompt;

/// Requested output dimensions, parsed from `WxH`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageSize {
    /// pixels
    pub width: u32,
    /// pixels
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

impl FromStr for ImageSize {
    type Err = ImagegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ImagegenError::InvalidSize(s.to_string());
        let (width, height) = s.trim().split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Request body for the inference endpoint.
#[derive(Debug, Serialize)]
struct InferencePayload<'a> {
    inputs: &'a str,
    negative_prompt: &'a str,
    wait_for_model: bool,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    guidance_scale: f64,
    num_inference_steps: u32,
    scheduler: &'static str,
    width: u32,
    height: u32,
}

impl<'a> InferencePayload<'a> {
    fn new(prompt: &'a EnhancedPrompt, size: ImageSize) -> Self {
        Self {
            inputs: &prompt.positive,
            negative_prompt: &prompt.negative,
            wait_for_model: true,
            parameters: InferenceParameters {
                guidance_scale: GUIDANCE_SCALE,
                num_inference_steps: NUM_INFERENCE_STEPS,
                scheduler: SCHEDULER,
                width: size.width,
                height: size.height,
            },
        }
    }
}

/// Calls the inference API with an injected bearer token.
#[derive(Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl InferenceClient {
    /// Creates a client for a full endpoint URL. Blank tokens count as missing.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), endpoint, token)
    }

    /// Like [`InferenceClient::new`], with a caller-built HTTP client.
    pub fn with_http_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Joins the API base URL and a model id into an endpoint URL.
    pub fn endpoint_for_model(base_url: &str, model_id: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            model_id.trim_start_matches('/')
        )
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether a usable credential was configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Generates an image, returning PNG bytes.
    ///
    /// Makes exactly one request. Without a token no request is made at all.
    pub async fn generate(
        &self,
        prompt: &EnhancedPrompt,
        size: ImageSize,
    ) -> Result<Vec<u8>, ImagegenError> {
        let Some(token) = self.token.as_deref() else {
            return Err(ImagegenError::Inference {
                status: None,
                body: "No Hugging Face token provided".to_string(),
            });
        };

        let payload = InferencePayload::new(prompt, size);
        debug!("Sending inference request to {} ({})", self.endpoint, size);

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(err) => format!("failed to read response body: {err}"),
            };
            return Err(ImagegenError::Inference {
                status: Some(status.as_u16()),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        normalize_image_to_png(&bytes)
    }
}

/// Ensures image bytes are a valid PNG, converting if possible.
pub fn normalize_image_to_png(bytes: &[u8]) -> Result<Vec<u8>, ImagegenError> {
    if bytes.len() < 4 {
        debug!("Image is too short");
        return Err(ImagegenError::InvalidImage(format!(
            "{} bytes is too short to be an image",
            bytes.len()
        )));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| {
            debug!("Failed to guess image format: {}", err);
            ImagegenError::InvalidImage(err.to_string())
        })?;
    let format = reader.format();
    let image = reader.decode()?;

    if format == Some(ImageFormat::Png) {
        return Ok(bytes.to_vec());
    }

    let mut output = Vec::new();
    image.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

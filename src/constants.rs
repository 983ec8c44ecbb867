//! Shared constants/setters for things
//!

/// Where the inference API lives, the model id is appended.
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Text-to-image model used when none is configured.
pub const DEFAULT_MODEL_ID: &str = "runwayml/stable-diffusion-v1-5";

/// Default static root, generated images live in `images/` beneath it.
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// Subdirectory of the static root holding generated images.
pub const IMAGES_SUBDIR: &str = "images";

/// Path the static root is served under.
pub const STATIC_URL_PREFIX: &str = "/static";

/// Style used when the request doesn't name one.
pub const DEFAULT_STYLE: &str = "standard";

/// Size used when the request doesn't name one.
pub const DEFAULT_SIZE: &str = "512x512";

/// Classifier-free guidance scale sent to the model.
pub const GUIDANCE_SCALE: f64 = 7.5;

/// Denoising steps sent to the model.
pub const NUM_INFERENCE_STEPS: u32 = 50;

/// Scheduler name sent to the model.
pub const SCHEDULER: &str = "DPMSolverMultistep";

/// Width and height requested from the stock/placeholder services.
pub const FALLBACK_IMAGE_SIZE: u32 = 500;

/// How many fresh filenames to try before giving up on a write.
pub const MAX_FILENAME_ATTEMPTS: usize = 16;

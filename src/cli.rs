//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

use crate::constants::{DEFAULT_INFERENCE_BASE_URL, DEFAULT_MODEL_ID, DEFAULT_STATIC_DIR};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "IMAGEGEN_DEBUG")]
    /// Enable debug logging. Env: IMAGEGEN_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "8080", env = "IMAGEGEN_PORT")]
    /// http listener, defaults to `8080`.
    /// Env: IMAGEGEN_PORT
    pub port: NonZeroU16,
    #[clap(long, short, default_value = "0.0.0.0", env = "IMAGEGEN_LISTEN_ADDRESS")]
    /// Listen address, defaults to `0.0.0.0`.
    /// Env: IMAGEGEN_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, default_value = DEFAULT_STATIC_DIR, env = "IMAGEGEN_STATIC_DIR")]
    /// Static root, served under `/static`. Generated images go in `images/` below it.
    /// Env: IMAGEGEN_STATIC_DIR
    pub static_dir: PathBuf,

    #[clap(long, default_value = DEFAULT_INFERENCE_BASE_URL, env = "IMAGEGEN_INFERENCE_BASE_URL")]
    /// Base URL of the inference API, the model id is appended.
    /// Env: IMAGEGEN_INFERENCE_BASE_URL
    pub inference_base_url: String,

    #[clap(long, default_value = DEFAULT_MODEL_ID, env = "IMAGEGEN_MODEL_ID")]
    /// Text-to-image model id.
    /// Env: IMAGEGEN_MODEL_ID
    pub model_id: String,

    #[clap(long, env = "HF_TOKEN", hide_env_values = true)]
    /// Hugging Face API token. Without one every request is served a fallback image.
    /// Env: HF_TOKEN
    pub hf_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CliOptions::try_parse_from(["imagegen"]).expect("parse defaults");
        assert_eq!(cli.port.get(), 8080);
        assert_eq!(cli.listen_address, "0.0.0.0");
        assert_eq!(cli.static_dir, PathBuf::from("./static"));
        assert_eq!(cli.model_id, "runwayml/stable-diffusion-v1-5");
    }

    #[test]
    fn overrides() {
        let cli = CliOptions::try_parse_from([
            "imagegen",
            "--port",
            "9001",
            "--static-dir",
            "/srv/static",
            "--hf-token",
            "hf_abc",
        ])
        .expect("parse overrides");
        assert_eq!(cli.port.get(), 9001);
        assert_eq!(cli.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(cli.hf_token.as_deref(), Some("hf_abc"));
    }
}

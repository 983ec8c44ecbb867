//! Config handling

use std::path::PathBuf;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::constants::{IMAGES_SUBDIR, STATIC_URL_PREFIX};
use crate::inference::InferenceClient;
use crate::storage::ImageStore;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Runtime settings for the server, built from the CLI.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Static root served under `/static`
    pub static_dir: PathBuf,
    /// Full inference endpoint URL
    pub inference_endpoint: String,
    /// Bearer token for the inference API
    pub hf_token: Option<String>,
}

impl From<&CliOptions> for AppConfig {
    fn from(cli: &CliOptions) -> Self {
        Self {
            static_dir: cli.static_dir.clone(),
            inference_endpoint: InferenceClient::endpoint_for_model(
                &cli.inference_base_url,
                &cli.model_id,
            ),
            hf_token: cli.hf_token.clone(),
        }
    }
}

impl AppConfig {
    /// Where generated images are written.
    pub fn image_dir(&self) -> PathBuf {
        self.static_dir.join(IMAGES_SUBDIR)
    }

    /// Builds the inference client with the configured credential.
    pub fn inference_client(&self) -> InferenceClient {
        InferenceClient::new(self.inference_endpoint.clone(), self.hf_token.clone())
    }

    /// Builds the image store for generated images.
    pub fn image_store(&self) -> ImageStore {
        ImageStore::new(
            self.image_dir(),
            &format!("{STATIC_URL_PREFIX}/{IMAGES_SUBDIR}"),
        )
    }
}

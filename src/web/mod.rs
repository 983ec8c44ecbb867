//! HTTP surface: landing page, generation endpoint, gallery and static files.

use std::num::NonZeroU16;
use std::path::Path;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, instrument};

use crate::config::AppConfig;
use crate::constants::STATIC_URL_PREFIX;
use crate::error::ImagegenError;
use crate::inference::{ImageSize, InferenceClient};
use crate::storage::{ImageStore, StoredImage};
use crate::style;

mod generate;
mod views;

use generate::generate_image_handler;
use views::{images_handler, index_handler};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    inference: InferenceClient,
    store: ImageStore,
}

impl AppState {
    pub(crate) fn new(inference: InferenceClient, store: ImageStore) -> Self {
        Self { inference, store }
    }

    /// The AI path: style the prompt, call the model, write the result.
    #[instrument(skip_all, fields(style = %style, size = %size))]
    pub(crate) async fn generate_ai_image(
        &self,
        prompt: &str,
        style: &str,
        size: &str,
    ) -> Result<StoredImage, ImagegenError> {
        let enhanced = style::enhance_with_key(prompt, style)?;
        let size: ImageSize = size.parse()?;
        let image = self.inference.generate(&enhanced, size).await?;
        debug!("Generated image with prompt: '{}'", prompt);
        self.store.persist(&image).await
    }
}

fn create_router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(index_handler))
        .route("/styles.css", axum::routing::get(styles_handler))
        .route(
            "/generate-image",
            axum::routing::post(generate_image_handler),
        )
        .route("/images", axum::routing::get(images_handler))
        .nest_service(STATIC_URL_PREFIX, ServeDir::new(static_dir))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Creates the image directory, then serves the app until ctrl-c.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    config: &AppConfig,
) -> Result<(), anyhow::Error> {
    let state = AppState::new(config.inference_client(), config.image_store());
    state.store.ensure_dir().await?;
    if !state.inference.has_token() {
        info!("No Hugging Face token configured, every request will get a fallback image");
    }

    let app = create_router(&config.static_dir).with_state(state);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}

use askama::Template;
use askama_web::WebTemplate;
use axum::Json;
use serde::Serialize;

use crate::constants::DEFAULT_SIZE;
use crate::fallback::stock_photo_url;
use crate::style::Style;

/// Sizes offered on the landing page.
const SIZE_OPTIONS: &[&str] = &["512x512", "768x768", "512x768", "768x512"];

#[derive(Clone, Debug)]
pub(crate) struct StyleOption {
    pub(crate) key: &'static str,
    pub(crate) label: &'static str,
    pub(crate) selected: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct SizeOption {
    pub(crate) value: &'static str,
    pub(crate) selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) styles: Vec<StyleOption>,
    pub(crate) sizes: Vec<SizeOption>,
}

/// handles the / GET
pub(crate) async fn index_handler() -> IndexTemplate {
    let default_style = Style::default();
    IndexTemplate {
        styles: Style::ALL
            .into_iter()
            .map(|style| StyleOption {
                key: style.key(),
                label: style.label(),
                selected: style == default_style,
            })
            .collect(),
        sizes: SIZE_OPTIONS
            .iter()
            .map(|&value| SizeOption {
                value,
                selected: value == DEFAULT_SIZE,
            })
            .collect(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct SampleImage {
    pub(crate) id: u32,
    pub(crate) prompt: &'static str,
    pub(crate) image_url: String,
    pub(crate) is_ai: bool,
}

/// Fixed gallery shown before anything has been generated.
pub(crate) async fn images_handler() -> Json<Vec<SampleImage>> {
    let samples = [
        (1, "Beautiful mountain landscape", "1366909"),
        (2, "Futuristic city skyline", "466685"),
        (3, "Cute dog", "1108099"),
    ];
    Json(
        samples
            .into_iter()
            .map(|(id, prompt, photo_id)| SampleImage {
                id,
                prompt,
                image_url: stock_photo_url(photo_id),
                is_ai: false,
            })
            .collect(),
    )
}

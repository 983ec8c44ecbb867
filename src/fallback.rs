//! Picks a stock photo or placeholder when AI generation didn't work out.
//!
//! Everything here is total: any prompt, including an empty one, produces a
//! usable URL.

use chrono::Utc;

use crate::constants::FALLBACK_IMAGE_SIZE;

/// Keyword to stock photo id. Order matters, the first keyword contained in
/// the prompt wins.
pub static STOCK_PHOTOS: &[(&str, &str)] = &[
    ("dog", "1108099"),
    ("cat", "617278"),
    ("mountain", "1366909"),
    ("beach", "1005417"),
    ("city", "466685"),
    ("forest", "15286"),
    ("flower", "736230"),
    ("food", "1099680"),
    ("car", "210019"),
];

/// The substitute image chosen for a prompt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FallbackImage {
    /// A mapped stock photo
    StockPhoto {
        /// Keyword that matched
        keyword: &'static str,
        /// Photo URL
        url: String,
    },
    /// Placeholder service image searched by the prompt
    Placeholder {
        /// Placeholder URL
        url: String,
    },
}

impl FallbackImage {
    /// URL to hand back to the client.
    pub fn url(&self) -> &str {
        match self {
            Self::StockPhoto { url, .. } | Self::Placeholder { url } => url,
        }
    }

    /// Consumes self, returning the URL.
    pub fn into_url(self) -> String {
        match self {
            Self::StockPhoto { url, .. } | Self::Placeholder { url } => url,
        }
    }
}

/// The prompt as a URL path term, spaces become `+`.
pub fn search_term(prompt: &str) -> String {
    url::form_urlencoded::byte_serialize(prompt.as_bytes()).collect()
}

/// Stock photo URL for a mapped photo id.
pub fn stock_photo_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w={FALLBACK_IMAGE_SIZE}"
    )
}

/// Placeholder service URL, `lock` pins the image for a given value.
pub fn placeholder_url(search_term: &str, lock: i64) -> String {
    format!(
        "https://loremflickr.com/{FALLBACK_IMAGE_SIZE}/{FALLBACK_IMAGE_SIZE}/{search_term}?lock={lock}"
    )
}

/// Resolves a fallback using the current unix time for the placeholder lock.
pub fn resolve(prompt: &str) -> FallbackImage {
    resolve_with_lock(prompt, Utc::now().timestamp())
}

/// Resolves a fallback with an explicit placeholder lock value.
pub fn resolve_with_lock(prompt: &str, lock: i64) -> FallbackImage {
    // Keywords are matched on the prompt text, the encoded term only goes in the URL.
    let haystack = prompt.replace(' ', "+").to_lowercase();

    if let Some(&(keyword, photo_id)) = STOCK_PHOTOS
        .iter()
        .find(|(keyword, _)| haystack.contains(*keyword))
    {
        return FallbackImage::StockPhoto {
            keyword,
            url: stock_photo_url(photo_id),
        };
    }

    FallbackImage::Placeholder {
        url: placeholder_url(&search_term(prompt), lock),
    }
}

//! Writes generated images under the public static directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::constants::MAX_FILENAME_ATTEMPTS;
use crate::error::ImagegenError;

/// An image that has been written to disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredImage {
    /// Bare filename, eg `generated_20250101120000_1234.png`
    pub filename: String,
    /// Where the file landed on disk
    pub path: PathBuf,
    /// Public URL the file is served from
    pub url: String,
}

/// Stores images in one directory and knows the URL prefix it is served under.
#[derive(Clone, Debug)]
pub struct ImageStore {
    image_dir: PathBuf,
    url_prefix: String,
}

/// Builds `generated_<YYYYmmddHHMMSS>_<suffix>.png`.
pub fn generated_filename(now: DateTime<Utc>, suffix: u16) -> String {
    format!("generated_{}_{suffix:04}.png", now.format("%Y%m%d%H%M%S"))
}

fn random_suffix() -> u16 {
    rand::random_range(1000..=9999)
}

impl ImageStore {
    /// `url_prefix` is joined with the filename to form the public URL.
    pub fn new(image_dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            image_dir: image_dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Directory images are written to.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Creates the image directory if it's missing.
    pub async fn ensure_dir(&self) -> Result<(), ImagegenError> {
        tokio::fs::create_dir_all(&self.image_dir)
            .await
            .map_err(|err| {
                ImagegenError::Persistence(format!(
                    "Failed to create {}: {}",
                    self.image_dir.display(),
                    err
                ))
            })
    }

    /// Writes the bytes to a fresh uniquely named file.
    ///
    /// Files are created exclusively, a name that's already taken gets a new
    /// random suffix instead of being overwritten.
    pub async fn persist(&self, bytes: &[u8]) -> Result<StoredImage, ImagegenError> {
        self.ensure_dir().await?;

        for _ in 0..MAX_FILENAME_ATTEMPTS {
            let filename = generated_filename(Utc::now(), random_suffix());
            let path = self.image_dir.join(&filename);
            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists, picking another name", filename);
                    continue;
                }
                Err(err) => {
                    return Err(ImagegenError::Persistence(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        err
                    )));
                }
            };
            file.write_all(bytes).await?;
            file.flush().await?;

            let url = format!("{}/{}", self.url_prefix, filename);
            return Ok(StoredImage {
                filename,
                path,
                url,
            });
        }

        Err(ImagegenError::Persistence(format!(
            "No free filename in {} after {} attempts",
            self.image_dir.display(),
            MAX_FILENAME_ATTEMPTS
        )))
    }
}

//! Local filesystem storage for uploaded car images.
//!
//! Images are written below the configured media root under a random key such as
//! `car_images/Xk3…q.jpg`. The key is what gets persisted; `url_for` turns it into the
//! public URL the media directory is served under.

use rand::{distr::Alphanumeric, Rng};
use std::path::{Path, PathBuf};

use crate::server::{
    error::AppError,
    model::image::{ImageFormat, UploadedImage},
};

/// Directory below the media root that car images are stored in
const CAR_IMAGE_DIR: &str = "car_images";
const KEY_LENGTH: usize = 24;

#[derive(Clone, Debug)]
pub struct ImageStorage {
    root: PathBuf,
    public_url: String,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    /// Creates the storage directories if they don't exist yet
    pub async fn init(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(self.root.join(CAR_IMAGE_DIR)).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an uploaded image to disk and returns its storage key
    ///
    /// # Returns
    /// - `Ok(String)` - Key of the stored image, relative to the media root
    /// - `Err(AppError::BadRequest)` - File is empty or not a supported image format
    /// - `Err(AppError::IoErr)` - Failed to write the file
    pub async fn save(&self, upload: &UploadedImage) -> Result<String, AppError> {
        let format = validate_image(upload)?;

        let name: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(KEY_LENGTH)
            .map(char::from)
            .collect();
        let key = format!("{}/{}.{}", CAR_IMAGE_DIR, name, format.extension());

        tokio::fs::write(self.root.join(&key), &upload.bytes).await?;

        Ok(key)
    }

    /// Removes a stored image. A missing file is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes every key, logging failures instead of returning them
    pub async fn remove_all(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.remove(key).await {
                tracing::warn!("Failed to remove stored image {}: {}", key, e);
            }
        }
    }

    #[cfg(test)]
    pub fn exists(&self, key: &str) -> bool {
        self.root.join(key).is_file()
    }

    /// Public URL of a stored image
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url.trim_end_matches('/'), key)
    }
}

/// Checks that an upload is a non-empty file in one of the accepted image formats
pub fn validate_image(upload: &UploadedImage) -> Result<ImageFormat, AppError> {
    let name = upload.file_name.as_deref().unwrap_or("upload");

    if upload.bytes.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Uploaded file '{}' is empty",
            name
        )));
    }

    ImageFormat::detect(&upload.bytes).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Uploaded file '{}' is not a supported image (JPEG, PNG, GIF or WEBP)",
            name
        ))
    })
}

//! Domain & parameter models for car images
//!
//! Covers the stored image rows, the raw uploads received from a multipart request,
//! and detection of the accepted image formats from their leading bytes.

use axum::body::Bytes;

use crate::{model::car::CarImageDto, server::storage::ImageStorage};

/// A stored car image
///
/// `image` is the storage key relative to the media root, not a URL.
#[derive(Debug, Clone)]
pub struct CarImage {
    pub id: i32,
    pub image: String,
    pub is_primary: bool,
}

impl CarImage {
    pub fn from_entity(entity: entity::car_image::Model) -> Self {
        Self {
            id: entity.id,
            image: entity.image,
            is_primary: entity.is_primary,
        }
    }

    /// Converts into a DTO, resolving the storage key into a public URL
    pub fn into_dto(self, storage: &ImageStorage) -> CarImageDto {
        CarImageDto {
            id: self.id,
            image: storage.url_for(&self.image),
            is_primary: self.is_primary,
        }
    }
}

/// Row to insert for an image whose bytes are already stored under `image`
#[derive(Debug, Clone)]
pub struct NewCarImage {
    pub image: String,
    pub is_primary: bool,
}

/// A file received from the upload form, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detects the format from the file signature, ignoring the client supplied name
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_MEDIA_URL: &str = "/media";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct Config {
    pub database_url: String,

    /// Directory uploaded car images are written to
    pub media_root: String,
    /// Public path prefix the media directory is served under
    pub media_url: String,

    pub bind_address: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(value) => value.parse::<usize>().map_err(|e| {
                AppError::InternalError(format!("Invalid MAX_UPLOAD_BYTES '{}': {}", value, e))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            media_root: env_or("MEDIA_ROOT", DEFAULT_MEDIA_ROOT),
            media_url: env_or("MEDIA_URL", DEFAULT_MEDIA_URL),
            bind_address: env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            max_upload_bytes,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

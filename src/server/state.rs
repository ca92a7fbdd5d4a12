//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;

use crate::server::storage::ImageStorage;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a connection pool whose clones
/// share the pool, and `ImageStorage` only holds the media root and public URL.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Storage for uploaded car images.
    pub storage: ImageStorage,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage: ImageStorage) -> Self {
        Self { db, storage }
    }
}

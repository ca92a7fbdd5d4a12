mod model;
mod server;

use axum::extract::DefaultBodyLimit;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, router, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let storage = startup::setup_image_storage(&config).await?;

    let app = router::router()
        .nest_service(&config.media_url, ServeDir::new(storage.root()))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(session)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(db, storage));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

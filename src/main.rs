// src/main.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use kennel_backend::api::http::router::app_router;
use kennel_backend::config::CONFIG;
use kennel_backend::media::{HttpObjectStore, PassthroughPipeline};
use kennel_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Kennel Backend");
    info!("Data dir: {}", CONFIG.data_dir);
    info!("Cages: 1..={}", CONFIG.max_cages);
    info!("Photo bucket: {}/{}", CONFIG.media_endpoint, CONFIG.media_bucket);

    let photos = Arc::new(
        HttpObjectStore::new(
            CONFIG.media_endpoint.clone(),
            CONFIG.media_bucket.clone(),
            CONFIG.media_public_url.clone(),
        )
        .with_bearer_token(CONFIG.media_bearer_token.clone()),
    );

    let app_state = Arc::new(AppState::new(
        Path::new(&CONFIG.data_dir),
        photos,
        Arc::new(PassthroughPipeline),
    ));

    let app = app_router(app_state);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}

//! services/api/src/bin/api.rs

use plan_api_lib::{
    config::Config,
    error::ApiError,
    web::{self, state::AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Shared AppState ---
    let bind_address = config.bind_address;
    info!(
        "Seeding credential store with {} user(s)",
        config.seed_users.len()
    );
    let app_state = Arc::new(AppState::in_memory(config));

    // --- 3. Create the Web Router ---
    let app = web::app(app_state);

    // --- 4. Start the Server ---
    info!("Starting server on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

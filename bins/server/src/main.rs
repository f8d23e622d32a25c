//! DocEngine API Server
//!
//! Main entry point for the document approval service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docengine_api::{AppState, create_router};
use docengine_db::connect;
use docengine_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docengine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Refuses to start on missing or invalid settings
    let config = AppConfig::load()?;
    info!(
        app = %config.app_name,
        environment = %config.environment,
        "Configuration loaded"
    );

    let db = connect(&config.database).await?;
    info!("Connected to database");

    let state = AppState::new(&config, db);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use pfl_api::config;
use pfl_api::database::DatabaseManager;
use pfl_api::server::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting PFL API in {:?} mode", config.environment);

    let pool = DatabaseManager::main_pool().await?;
    let app = server::app(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("PFL API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

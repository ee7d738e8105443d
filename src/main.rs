use anyhow::Context;
use tracing_subscriber::EnvFilter;

use workout_api::api::{app, AppState};
use workout_api::auth::TokenService;
use workout_api::config::AppConfig;
use workout_api::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_* and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Workout API in {:?} mode", config.environment);

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.bootstrap_schema {
        database
            .bootstrap_schema()
            .await
            .context("failed to bootstrap schema")?;
    }

    let tokens = TokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)?;
    let state = AppState::postgres(database.clone(), tokens);
    let router = app(state, &config.api);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Workout API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

mod bot;
mod config;
mod controller;
mod data;
mod error;
mod middleware;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config, error::AppError, service::afk::AfkService, state::AppState,
    util::lock::KeyedLocks,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        // Restart-with-backoff belongs to the process supervisor, not to us
        tracing::error!("Fatal startup error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;

    let afk_locks = KeyedLocks::new();
    let clan_locks = KeyedLocks::new();

    // Bring cached activation flags up to date before serving anything
    let changed = AfkService::new(&db, afk_locks.clone())
        .refresh_activation()
        .await?;
    if changed > 0 {
        tracing::info!("Startup activation sweep updated {} AFK windows", changed);
    }

    tracing::info!("Starting server");

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, db.clone()).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Start the periodic AFK activation sweep
    scheduler::afk_sweep::start_scheduler(db.clone(), afk_locks.clone()).await?;

    // Start the periodic clan roster reconciliation
    scheduler::roster_sync::start_scheduler(
        db.clone(),
        discord_http.clone(),
        config.clone(),
        clan_locks.clone(),
    )
    .await?;

    let state = AppState::new(db, config.clone(), afk_locks, clan_locks);
    let app = router::router(state);

    let listener = tokio::net::TcpListener::bind(&config.api_bind_addr).await?;
    tracing::info!("REST API listening on {}", config.api_bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use anyhow::Context;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use taskdesk::config::AppConfig;
use taskdesk::core::shared::state::AppState;
use taskdesk::core::shared::utils::{create_conn, run_migrations};
use taskdesk::main_module::run_axum_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!(
        "Starting {} {} with database {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.database.url
    );

    let pool = create_conn(&config.database).context("Failed to create database pool")?;
    run_migrations(&pool).context("Failed to run database migrations")?;

    let state = AppState::new(&config, pool).context("Failed to initialize application state")?;
    run_axum_server(Arc::new(state), &config.server)
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

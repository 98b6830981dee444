use anyhow::{Context, Result};
use chatstream::{config::Config, server, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir))?;
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "chatstream.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    let state = Arc::new(AppState::new(&config));
    info!(
        channel = %state.channel.name(),
        history_limit = config.history_limit,
        "Chat stream starting"
    );

    server::start_server(state, config.port, config.cors).await
}

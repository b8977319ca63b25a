use ageinfo::clock::SystemClock;
use ageinfo::config::Config;
use ageinfo::server::{self, AppState};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ageinfo=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting age calculator service");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Default locale: {}, UTC offset: {} minutes",
        config.default_locale, config.utc_offset_minutes
    );

    let state = AppState::new(config, Arc::new(SystemClock));
    server::serve(state).await
}

//! Classboard Server - Main entry point

use anyhow::Result;
use classboard_common::logging::{init_logging, LogConfig};
use tracing::info;

use classboard_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("classboard-server")
        .filter_directives("classboard_server=debug,tower_http=debug,sqlx=info")
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    info!("Starting Classboard Server");

    let config = Config::load()?;
    info!(
        store = ?config.store,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}

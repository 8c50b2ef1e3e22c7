mod cli;

use anyhow::Context;
use clap::Parser;
use smart_shop::{App, AppConfig, init_logger};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    let _log_guard = init_logger(&config.log_level, config.log_dir.as_deref());

    let app = App::from_config(&config).context("failed to set up the shop client")?;

    let shutdown = app.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling pending requests");
            shutdown.cancel();
        }
    });

    cli::run(&app, cli.command, cli.json).await
}

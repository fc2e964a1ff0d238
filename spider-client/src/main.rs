//! spiderctl - command-line client for the spider backend.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spider_client::format::error_message;
use spider_client::{Config, FileTokenStore, Gateway};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check spiderctl.toml or the SPIDER__SECTION__KEY environment variables.",
            e
        )
    })?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = args.base_url.unwrap_or(config.api.base_url);
    let store = Arc::new(FileTokenStore::in_dir(&config.storage.data_dir));
    tracing::debug!(
        "Using backend {} with token store {}",
        base_url,
        store.path().display()
    );

    let gateway = Gateway::new(&base_url, store);

    if let Err(e) = cli::run(args.command, &gateway).await {
        tracing::debug!(code = %e.code, status = %e.status, "Command failed");
        eprintln!("error: {}", error_message(&e));
        std::process::exit(1);
    }

    Ok(())
}

//! Cardea console entry point.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

use clap::Parser;

use cardea_cli::commands;
use cardea_cli::{CardeaConfig, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // -v info, -vv debug; RUST_LOG wins when set.
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info,cardea=info",
        _ => "debug,cardea=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = CardeaConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
    }
    tracing::debug!("API base URL: {}", config.api.base_url);

    commands::dispatch(cli, config).await?;
    Ok(())
}

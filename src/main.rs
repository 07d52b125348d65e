//! cf-ddns - point a Cloudflare A record at the current public IP.

use anyhow::Context;
use cf_ddns::{Config, DdnsError, Updater};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-ddns")]
#[command(about = "Update a Cloudflare DNS A record with the current public IP")]
#[command(version)]
struct Cli {
    /// Path to the JSON config file
    config: Option<PathBuf>,

    /// Resolve the IP and show the payload without updating the record
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .ok_or_else(|| DdnsError::Usage("config file not specified".to_string()))?;

    let config = Config::load_from(&config_path)?;
    let updater = Updater::new(&config)?;

    if cli.dry_run {
        updater.dry_run().await.context("dry run failed")?;
        return Ok(());
    }

    // A rejected update is reported as a warning and still exits 0.
    updater
        .run()
        .await
        .with_context(|| format!("failed to update {}", config.name))?;

    Ok(())
}

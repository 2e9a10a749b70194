//! Command line front end for affald that prints pickup dates and draws category pictures.

mod commands;
mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use affald_core::{AffaldService, AssetDirectory};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_LEVEL};

#[derive(Debug, Parser)]
#[command(version, about = "Danish waste pickup dates and icons")]
struct Arguments {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the state of every configured sensor as JSON.
    Status {
        /// Evaluate as of this date instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show which icons a waste label maps to.
    Icons {
        /// Free-text waste category, e.g. "Mad og glas".
        label: String,
    },
    /// Draw icons side by side into a PNG file.
    Image {
        /// Comma separated icon identifiers.
        #[arg(long)]
        images: String,
        /// Destination file.
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = Arguments::parse();

    match arguments.command {
        Command::Icons { label } => {
            init_tracing(DEFAULT_LOG_LEVEL);
            commands::write_icons(&mut io::stdout().lock(), &label)?;
            Ok(())
        }
        Command::Status { date } => {
            let service = load_service(&arguments.config)?;
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            commands::write_status(&mut io::stdout().lock(), &service, today)
        }
        Command::Image { images, output } => {
            let service = load_service(&arguments.config)?;
            let written = commands::write_picture(&service, &images, &output).await?;
            info!(bytes = written, output = %output.display(), "Picture written");
            Ok(())
        }
    }
}

/// Read the configuration, start logging at its level and wire up the service.
fn load_service(path: &Path) -> Result<AffaldService> {
    let config = config::load_from_path(path)
        .with_context(|| format!("loading {}", path.display()))?;
    init_tracing(&config.logging.level);

    let (registry, asset_dir) = config.into_registry();
    let assets = AssetDirectory::new(asset_dir);
    info!(
        sensors = registry.len(),
        assets = %assets.root().display(),
        "Configuration loaded"
    );
    Ok(AffaldService::new(Arc::new(registry), Arc::new(assets)))
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

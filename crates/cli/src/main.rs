//! Vitrine CLI - Main Entry Point
//!
//! Runs the catalog page's live filter against a local catalog and talks to
//! the catalog search API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod output;

use commands::{api, catalog, input};
use vitrine_common::config::default_config_path;
use vitrine_common::VitrineConfig;

/// Vitrine - catalog live filter and search client
#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ~/.vitrine/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog API base URL, overrides the configuration
    #[arg(long, env = "VITRINE_API_URL", global = true)]
    api_url: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a catalog with a query and show what stays visible
    Filter(catalog::FilterArgs),

    /// Read queries from stdin and filter as typing pauses
    Watch(catalog::WatchArgs),

    /// Search the catalog API
    Search(api::SearchArgs),

    /// List categories from the catalog API
    Categories,

    /// List tags from the catalog API
    Tags,

    /// Format a price value as the price field does on blur
    Price {
        /// Raw field value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Normalise a comma-separated tags value
    NormalizeTags {
        /// Raw field value
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Print each tag on its own line
        #[arg(long)]
        split: bool,
    },
}

fn load_config(cli: &Cli) -> Result<VitrineConfig> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = VitrineConfig::load_with_env(&path)?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    debug!("Using catalog API at {}", config.api.base_url);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Filter(args) => catalog::filter(args, format).await?,
        Commands::Watch(args) => catalog::watch(args, &config, format).await?,
        Commands::Search(args) => api::search(args, &config, format).await?,
        Commands::Categories => api::categories(&config, format).await?,
        Commands::Tags => api::tags(&config, format).await?,
        Commands::Price { value } => input::price(&value, format)?,
        Commands::NormalizeTags { value, split } => input::tags(&value, split, format)?,
    }

    Ok(())
}

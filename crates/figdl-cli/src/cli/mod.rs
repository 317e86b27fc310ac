//! CLI for figdl.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use figdl_core::config;
use figdl_core::strategy::Strategy;
use std::path::PathBuf;

use commands::{run_harvest, run_show_config};

/// Top-level CLI for figdl.
#[derive(Debug, Parser)]
#[command(name = "figdl")]
#[command(about = "figdl: download the images behind a Figma prototype page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by the three harvesting subcommands.
#[derive(Debug, Args)]
pub struct HarvestArgs {
    /// Page to harvest (defaults to `source_url` from config.toml).
    pub url: Option<String>,

    /// Output directory, created on demand (defaults to `output_dir` from config.toml).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Pause between downloads in milliseconds (overrides the strategy default).
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the page over plain HTTP and scrape <img>, inline styles and data-* attributes.
    Scrape {
        #[command(flatten)]
        args: HarvestArgs,
    },

    /// Render in headless Chromium; collect image requests, <img> sources and canvases.
    Sniff {
        #[command(flatten)]
        args: HarvestArgs,
    },

    /// Render in headless Chromium; capture image responses, the full DOM, canvases
    /// and inline SVGs, and write image_urls.json.
    Extract {
        #[command(flatten)]
        args: HarvestArgs,
    },

    /// Show the config file location and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scrape { args } => run_harvest(Strategy::Scrape, args, &cfg).await?,
            CliCommand::Sniff { args } => run_harvest(Strategy::Sniff, args, &cfg).await?,
            CliCommand::Extract { args } => run_harvest(Strategy::Extract, args, &cfg).await?,
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

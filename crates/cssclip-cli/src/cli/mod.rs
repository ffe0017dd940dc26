//! CLI for cssclip.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cssclip_core::config;
use std::path::PathBuf;

use commands::{run_link, run_scan, run_text};

/// Top-level CLI for cssclip.
#[derive(Debug, Parser)]
#[command(name = "cssclip")]
#[command(
    about = "cssclip: capture stylesheets with their imports, fonts and images for offline use",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the @import and url() references found in a CSS file.
    Scan {
        /// Path to the CSS file.
        path: PathBuf,
    },

    /// Capture CSS text from a local file, rewriting it to use saved assets.
    Text {
        /// Path to the CSS file.
        path: PathBuf,

        /// URL the text is relative to (the page URL for inline <style> text).
        #[arg(long)]
        base_url: String,

        /// URL of the captured document (defaults to --base-url, i.e. inline CSS).
        #[arg(long)]
        doc_url: Option<String>,

        /// Write the rewritten CSS here instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[command(flatten)]
        capture: CaptureArgs,
    },

    /// Fetch a stylesheet by URL (or local path) and capture it as an asset.
    Link {
        /// Stylesheet URL, relative to --base-url, or a local file path.
        link: String,

        /// URL the link is relative to (defaults to the link itself).
        #[arg(long)]
        base_url: Option<String>,

        /// URL of the captured document (defaults to --base-url).
        #[arg(long)]
        doc_url: Option<String>,

        #[command(flatten)]
        capture: CaptureArgs,
    },
}

/// Options shared by the capturing subcommands.
#[derive(Debug, Clone, Args)]
pub struct CaptureArgs {
    /// Identifier of this capture; used as the asset name stem.
    #[arg(long, default_value = "clip")]
    pub clip_id: String,

    /// Storage path of the asset folder (task filenames are placed under it).
    #[arg(long, default_value = "assets")]
    pub asset_folder: String,

    /// Path from the document's folder to the asset folder (overrides config).
    #[arg(long)]
    pub asset_relative_path: Option<String>,

    /// Capture web fonts referenced from @font-face (overrides config).
    #[arg(long)]
    pub save_web_font: bool,

    /// Capture images referenced from declarations (overrides config).
    #[arg(long)]
    pub save_css_image: bool,

    /// Persist every task below this directory.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan { path } => run_scan(&path)?,
            CliCommand::Text {
                path,
                base_url,
                doc_url,
                output,
                capture,
            } => {
                run_text(&cfg, &path, &base_url, doc_url.as_deref(), output.as_deref(), &capture)
                    .await?
            }
            CliCommand::Link {
                link,
                base_url,
                doc_url,
                capture,
            } => run_link(&cfg, &link, base_url.as_deref(), doc_url.as_deref(), &capture).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

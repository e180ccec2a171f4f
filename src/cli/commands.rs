//! CLI commands and argument parsing

use crate::output::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch every review page for a catalog item and export the records
#[derive(Parser, Debug)]
#[command(name = "review-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all review pages for an item and export them
    Fetch {
        /// Numeric item identifier
        item_id: String,

        #[command(flatten)]
        overrides: FetchOverrides,
    },

    /// Print the effective configuration as YAML
    Config {
        #[command(flatten)]
        overrides: FetchOverrides,
    },
}

/// Command-line values that replace configuration file values
#[derive(Args, Debug, Clone, Default)]
pub struct FetchOverrides {
    /// API base URL (the item id is appended)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum number of pages to request
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Additional attempts per page after a transport failure
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Export format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name without extension
    #[arg(long)]
    pub file_stem: Option<String>,
}

//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchOverrides};
use crate::config::HarvestConfig;
use crate::error::Result;
use crate::fetch::ReviewPageFetcher;
use crate::http::HttpClient;
use crate::output::{exporter_for, ExportSummary};
use crate::pagination::{PaginationController, StopReason};
use crate::types::ItemId;
use std::time::Instant;
use tracing::{info, warn};

/// Outcome of a fetch-and-export run
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestReport {
    /// Item the reviews belong to
    pub item: ItemId,
    /// Pages that contributed records
    pub pages_fetched: u32,
    /// Total pages declared by the API, if any
    pub total_pages: Option<u32>,
    /// Why fetching stopped
    pub stop_reason: StopReason,
    /// File written and rows in it
    pub export: ExportSummary,
}

impl HarvestReport {
    /// Check if the run stopped early and exported only some pages
    pub fn is_partial(&self) -> bool {
        self.stop_reason.is_early()
    }
}

/// Fetch every page for `item` and export the records.
///
/// Nothing is written when page 1 yields no records.
pub async fn harvest(config: &HarvestConfig, item: &ItemId) -> Result<HarvestReport> {
    config.validate()?;

    let client = HttpClient::with_config(config.http_client_config())?;
    let fetcher = ReviewPageFetcher::new(client, &config.api.base_url, item)?;
    info!("API Base URL: {}", fetcher.endpoint());

    let controller = PaginationController::new(fetcher)
        .with_retry(config.retry_policy())
        .with_max_pages(config.pagination.max_pages);

    let state = controller.run().await?;

    let pages_fetched = state.pages_fetched();
    let total_pages = state.total_pages_known();
    let stop_reason = state.stop_reason();
    if state.is_partial() {
        warn!(
            "Stopped early ({}); exporting {} reviews from {} pages",
            stop_reason,
            state.records().len(),
            pages_fetched
        );
    }

    let exporter = exporter_for(config.output.format, config.output_target());
    let export = exporter.export(state.into_records())?;

    Ok(HarvestReport {
        item: item.clone(),
        pages_fetched,
        total_pages,
        stop_reason,
        export,
    })
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch { item_id, overrides } => {
                self.fetch(item_id, overrides).await.map(|_| ())
            }
            Commands::Config { overrides } => self.show_config(overrides),
        }
    }

    /// Load the config file (if any) and apply command-line overrides
    pub fn effective_config(&self, overrides: &FetchOverrides) -> Result<HarvestConfig> {
        let mut config = match &self.cli.config {
            Some(path) => HarvestConfig::load(path)?,
            None => HarvestConfig::default(),
        };

        if let Some(base_url) = &overrides.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(max_pages) = overrides.max_pages {
            config.pagination.max_pages = max_pages;
        }
        if let Some(max_retries) = overrides.max_retries {
            config.retry.max_retries = max_retries;
        }
        if let Some(format) = overrides.format {
            config.output.format = format;
        }
        if let Some(dir) = &overrides.output_dir {
            config.output.directory.clone_from(dir);
        }
        if let Some(stem) = &overrides.file_stem {
            config.output.file_stem.clone_from(stem);
        }

        config.validate()?;
        Ok(config)
    }

    /// Fetch and export, printing a one-line summary
    pub async fn fetch(&self, item_id: &str, overrides: &FetchOverrides) -> Result<HarvestReport> {
        let item = ItemId::parse(item_id)?;
        let config = self.effective_config(overrides)?;

        let start = Instant::now();
        let report = harvest(&config, &item).await?;

        let status = if report.is_partial() {
            "partial"
        } else {
            "complete"
        };
        println!(
            "{status}: {} reviews from {} pages of item {} ({}) -> {} in {:.1}s",
            report.export.rows,
            report.pages_fetched,
            report.item,
            report.stop_reason,
            report.export.path.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(report)
    }

    /// Print the effective configuration
    fn show_config(&self, overrides: &FetchOverrides) -> Result<()> {
        let config = self.effective_config(overrides)?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

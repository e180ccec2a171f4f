// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # review-harvest
//!
//! Retrieves every page of reviews for one catalog item from a paginated
//! JSON API, tolerates transient network failures, and exports the records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use review_harvest::config::HarvestConfig;
//! use review_harvest::fetch::ReviewPageFetcher;
//! use review_harvest::http::HttpClient;
//! use review_harvest::pagination::PaginationController;
//! use review_harvest::{ItemId, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = HarvestConfig::default();
//!     let item = ItemId::parse("8366616")?;
//!
//!     let client = HttpClient::with_config(config.http_client_config())?;
//!     let fetcher = ReviewPageFetcher::new(client, &config.api.base_url, &item)?;
//!     let state = PaginationController::new(fetcher)
//!         .with_retry(config.retry_policy())
//!         .run()
//!         .await?;
//!
//!     println!("{} reviews", state.records().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    PaginationController                      │
//! │   page 1 ─▶ declared total ─▶ pages 2..=min(total, bound)    │
//! └──────────────────────────────────────────────────────────────┘
//!                │                                  │
//! ┌──────────────┴──────────┐          ┌────────────┴───────────┐
//! │ RetryPolicy             │          │ ResultAggregator       │
//! │  transport failures     │          │  RawReview ─▶ Record   │
//! │  only, bounded budget   │          │  append-only, ordered  │
//! └──────────────┬──────────┘          └────────────┬───────────┘
//! ┌──────────────┴──────────┐          ┌────────────┴───────────┐
//! │ PageFetcher             │          │ Exporter               │
//! │  Records / Empty /      │          │  xlsx/CSV/Parquet/JSON │
//! │  Malformed / Transport  │          │  non-colliding names   │
//! └─────────────────────────┘          └────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with rate limiting
pub mod http;

/// Single-page fetching and response classification
pub mod fetch;

/// Bounded retry for transport failures
pub mod retry;

/// Record aggregation in fetch order
pub mod aggregate;

/// Pagination state machine
pub mod pagination;

/// Record export
pub mod output;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{ItemId, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

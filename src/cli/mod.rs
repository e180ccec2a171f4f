//! CLI module
//!
//! Command-line interface for fetching reviews.
//!
//! # Commands
//!
//! - `fetch` - Fetch all review pages for an item and export them
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchOverrides};
pub use runner::{harvest, HarvestReport, Runner};

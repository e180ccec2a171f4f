//! Pagination module
//!
//! # Overview
//!
//! The controller is a small state machine:
//!
//! ```text
//! Start ──page 1 records──▶ Paging ──last page / bound──▶ Done
//!   │                         │
//!   │ page 1 empty,           │ empty, malformed or
//!   │ malformed or failed     │ failed page
//!   ▼                         ▼
//! Aborted (Err)             Done (partial)
//! ```
//!
//! Pages are fetched one at a time; page N+1 is not requested until page N,
//! including its retries, has resolved.

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{AggregateState, StopReason, DEFAULT_MAX_PAGES};

#[cfg(test)]
mod tests;

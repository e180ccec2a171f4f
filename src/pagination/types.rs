//! Pagination types
//!
//! The aggregate built by one run and the reason the run stopped.

use crate::aggregate::ResultAggregator;
use crate::fetch::RawReview;
use crate::types::Record;
use std::fmt;

/// Default upper bound on pages requested in one run
pub const DEFAULT_MAX_PAGES: u32 = 101;

/// Why a completed run stopped fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every declared page was fetched
    LastPage,
    /// The declared total exceeded the page bound
    PageBound,
    /// Page 1 did not report a total, so only page 1 was fetched
    NoPagination,
    /// A later page came back with no reviews
    EmptyPage {
        /// Page that was empty
        page: u32,
    },
    /// A later page did not have the expected shape
    MalformedPage {
        /// Page that was malformed
        page: u32,
    },
    /// A later page failed on every attempt
    TransportFailure {
        /// Page that could not be fetched
        page: u32,
    },
}

impl StopReason {
    /// Check if the run ended before reaching the last page it planned to fetch
    pub fn is_early(&self) -> bool {
        matches!(
            self,
            Self::EmptyPage { .. } | Self::MalformedPage { .. } | Self::TransportFailure { .. }
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastPage => f.write_str("last page reached"),
            Self::PageBound => f.write_str("page bound reached"),
            Self::NoPagination => f.write_str("no pagination metadata"),
            Self::EmptyPage { page } => write!(f, "page {page} was empty"),
            Self::MalformedPage { page } => write!(f, "page {page} was malformed"),
            Self::TransportFailure { page } => write!(f, "page {page} could not be fetched"),
        }
    }
}

/// Everything one run gathered.
///
/// The declared total is taken from the first page that reports one and is
/// never replaced. `last_page_attempted` only moves forward.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateState {
    aggregator: ResultAggregator,
    total_pages_known: Option<u32>,
    last_page_attempted: u32,
    pages_fetched: u32,
    stop_reason: StopReason,
}

impl Default for AggregateState {
    fn default() -> Self {
        Self {
            aggregator: ResultAggregator::new(),
            total_pages_known: None,
            last_page_attempted: 0,
            pages_fetched: 0,
            stop_reason: StopReason::LastPage,
        }
    }
}

impl AggregateState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Records gathered so far, in fetch order
    pub fn records(&self) -> &[Record] {
        self.aggregator.snapshot()
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<Record> {
        self.aggregator.into_records()
    }

    /// Total pages declared by the first page, if any
    pub fn total_pages_known(&self) -> Option<u32> {
        self.total_pages_known
    }

    /// Highest page index requested
    pub fn last_page_attempted(&self) -> u32 {
        self.last_page_attempted
    }

    /// Pages that contributed records
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Why fetching stopped
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Check if the run stopped early and kept only some pages
    pub fn is_partial(&self) -> bool {
        self.stop_reason.is_early()
    }

    /// Note that `page` is being attempted
    pub(crate) fn mark_attempted(&mut self, page: u32) {
        self.last_page_attempted = self.last_page_attempted.max(page);
    }

    /// Keep the first declared total; later values are ignored
    pub(crate) fn record_declared_total(&mut self, declared: Option<u32>) {
        if self.total_pages_known.is_none() {
            self.total_pages_known = declared;
        }
    }

    /// Append a page of records
    pub(crate) fn append_page(&mut self, items: Vec<RawReview>) -> usize {
        self.pages_fetched += 1;
        self.aggregator.append(items)
    }

    pub(crate) fn finish(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }
}

//! Pagination controller
//!
//! Drives pages 1, 2, 3, ... strictly in sequence. Page 1 decides the plan:
//! its declared total (capped by the page bound) is the last page requested.
//! A failure on page 1 aborts the run; a failure on a later page stops the
//! run and keeps what was gathered.

use super::types::{AggregateState, StopReason, DEFAULT_MAX_PAGES};
use crate::error::{AbortReason, Error, Result};
use crate::fetch::{PageFetcher, PageResult};
use crate::retry::RetryPolicy;
use tracing::{debug, info, warn};

/// Runs the paginated retrieval for one item
#[derive(Debug)]
pub struct PaginationController<F> {
    fetcher: F,
    retry: RetryPolicy,
    max_pages: u32,
}

impl<F: PageFetcher> PaginationController<F> {
    /// Create a controller with the default retry policy and page bound
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            retry: RetryPolicy::default(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the upper bound on pages requested
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The page bound
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch every page and return the aggregate.
    ///
    /// Returns [`Error::Aborted`] when page 1 yields nothing usable.
    pub async fn run(&self) -> Result<AggregateState> {
        if self.max_pages == 0 {
            return Err(Error::invalid_value(
                "pagination.max_pages",
                "must be at least 1",
            ));
        }

        let mut state = AggregateState::new();

        // Start: page 1 decides whether there is anything to page through
        state.mark_attempted(1);
        let last_page = match self.fetch_page(1).await {
            PageResult::Records {
                items,
                declared_total_pages,
            } => {
                let count = state.append_page(items);
                info!(page = 1, "Data for page 1 saved ({} reviews)", count);
                state.record_declared_total(declared_total_pages);

                match state.total_pages_known() {
                    Some(total) => {
                        debug!(total, bound = self.max_pages, "Declared total pages");
                        total.min(self.max_pages)
                    }
                    None => {
                        warn!("No pager information found on page 1. Stopping.");
                        return Ok(state.finish(StopReason::NoPagination));
                    }
                }
            }
            PageResult::Empty => {
                return Err(Error::Aborted {
                    page: 1,
                    reason: AbortReason::EmptyPage,
                });
            }
            PageResult::Malformed(message) => {
                return Err(Error::Aborted {
                    page: 1,
                    reason: AbortReason::MalformedPage { message },
                });
            }
            PageResult::TransportFailure(cause) => {
                return Err(Error::Aborted {
                    page: 1,
                    reason: AbortReason::Transport {
                        attempts: self.retry.max_attempts(),
                        message: cause.to_string(),
                    },
                });
            }
        };

        // Paging: 2..=last_page, stopping at the first unusable page
        for page in 2..=last_page {
            state.mark_attempted(page);

            let stop = match self.fetch_page(page).await {
                PageResult::Records {
                    items,
                    declared_total_pages,
                } => {
                    if declared_total_pages.is_some()
                        && declared_total_pages != state.total_pages_known()
                    {
                        debug!(
                            page,
                            declared = ?declared_total_pages,
                            known = ?state.total_pages_known(),
                            "Ignoring changed total pages"
                        );
                    }
                    let count = state.append_page(items);
                    info!(page, "Data for page {} saved ({} reviews)", page, count);
                    continue;
                }
                PageResult::Empty => {
                    info!(page, "No comments found on page {}. Stopping.", page);
                    StopReason::EmptyPage { page }
                }
                PageResult::Malformed(message) => {
                    warn!(page, "Malformed response for page {}: {}. Stopping.", page, message);
                    StopReason::MalformedPage { page }
                }
                PageResult::TransportFailure(_) => StopReason::TransportFailure { page },
            };

            return Ok(state.finish(stop));
        }

        let reason = match state.total_pages_known() {
            Some(total) if total > self.max_pages => StopReason::PageBound,
            _ => StopReason::LastPage,
        };
        Ok(state.finish(reason))
    }

    async fn fetch_page(&self, page: u32) -> PageResult {
        self.retry.fetch_with_retry(&self.fetcher, page).await
    }
}

//! Bounded retry around a page fetcher
//!
//! Only transport failures are retried. Empty, malformed and record pages
//! are returned from the first attempt that produces them.

use crate::fetch::{PageFetcher, PageRequest, PageResult};
use crate::types::BackoffType;
use std::time::Duration;
use tracing::{error, warn};

/// Default number of additional attempts after the first
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry budget and delay between attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts permitted after the first failed one
    pub max_retries: u32,
    /// Shape of the delay curve
    pub backoff_type: BackoffType,
    /// Delay before the first retry; zero retries immediately
    pub initial_backoff: Duration,
    /// Upper bound on any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_type: BackoffType::Constant,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Immediate retries with the given budget
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Total attempts a page may receive
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculate the delay before retry number `retry` (zero-based)
    pub fn calculate_backoff(&self, retry: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(retry.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(retry);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Fetch `page_index`, retrying transport failures up to the budget.
    ///
    /// Returns the first non-transport outcome, or the last transport
    /// failure once `1 + max_retries` attempts have been made.
    pub async fn fetch_with_retry(&self, fetcher: &dyn PageFetcher, page_index: u32) -> PageResult {
        let mut request = PageRequest::first(page_index);

        loop {
            let result = fetcher.fetch(&request).await;

            let PageResult::TransportFailure(ref cause) = result else {
                return result;
            };

            if request.retry_count >= self.max_retries {
                error!(
                    page = page_index,
                    "Failed to fetch page {} after {} attempts: {}",
                    page_index,
                    request.retry_count + 1,
                    cause
                );
                return result;
            }

            let delay = self.calculate_backoff(request.retry_count);
            warn!(
                page = page_index,
                "Error fetching page {}: {}. Retrying ({}/{}) in {:?}",
                page_index,
                cause,
                request.retry_count + 1,
                self.max_retries,
                delay
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            request = request.retry();
        }
    }
}

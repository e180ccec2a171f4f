//! Retry module
//!
//! Wraps a [`PageFetcher`](crate::fetch::PageFetcher) with a bounded retry
//! budget for transport failures.

mod policy;

pub use policy::{RetryPolicy, DEFAULT_MAX_RETRIES};

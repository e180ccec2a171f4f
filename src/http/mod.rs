//! HTTP client module
//!
//! Provides a single-attempt HTTP client with rate limiting.
//!
//! # Features
//!
//! - **Default Headers**: Fixed content-negotiation headers on every request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: Timeouts and non-2xx statuses surface as transport errors

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, ERROR_BODY_LIMIT,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

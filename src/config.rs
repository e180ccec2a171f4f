//! Configuration for a harvest run
//!
//! Loaded from an optional YAML (or JSON) file; every field has a default,
//! and CLI flags override individual values.

use crate::error::{Error, Result};
use crate::fetch::REVIEW_HEADERS;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::output::{ExportFormat, OutputTarget};
use crate::pagination::DEFAULT_MAX_PAGES;
use crate::retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Retry budget and backoff
    pub retry: RetryConfig,
    /// Page bound
    pub pagination: PaginationConfig,
    /// Optional client-side rate limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimiterConfig>,
    /// Export destination and format
    pub output: OutputConfig,
}

impl HarvestConfig {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string (JSON is accepted as well)
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.pagination.max_pages == 0 {
            return Err(Error::invalid_value(
                "pagination.max_pages",
                "must be at least 1",
            ));
        }
        if self.api.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "api.timeout_seconds",
                "must be at least 1",
            ));
        }
        if self.output.file_stem.trim().is_empty() {
            return Err(Error::invalid_value("output.file_stem", "must not be empty"));
        }
        url::Url::parse(&self.api.base_url)?;
        Ok(())
    }

    /// HTTP client settings, with the fixed review headers applied first
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.api.timeout_seconds))
            .headers(REVIEW_HEADERS)
            .headers(self.api.headers.clone());

        if let Some(agent) = &self.api.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()).build(),
            None => builder.no_rate_limit().build(),
        }
    }

    /// Retry policy for page fetches
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry.max_retries).with_backoff(
            self.retry.backoff.backoff_type,
            Duration::from_millis(self.retry.backoff.initial_ms),
            Duration::from_millis(self.retry.backoff.max_ms),
        )
    }

    /// Where export files go
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::new(&self.output.directory, &self.output.file_stem)
    }
}

// ============================================================================
// API
// ============================================================================

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; the item id and a trailing slash are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Extra headers, applied over the fixed ones
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.digikala.com/v1/rate-review/products/".to_string()
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Retry
// ============================================================================

/// Retry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after a failed one
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff: BackoffConfig::default(),
        }
    }
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds (0 retries immediately)
    #[serde(default)]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Constant,
            initial_ms: 0,
            max_ms: default_max_ms(),
        }
    }
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Upper bound on pages requested, whatever the API declares
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

// ============================================================================
// Output
// ============================================================================

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for export files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name without extension
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Export format
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_stem: default_file_stem(),
            format: ExportFormat::default(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_stem() -> String {
    "comments".to_string()
}

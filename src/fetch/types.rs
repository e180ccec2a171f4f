//! Fetch types
//!
//! Per-attempt request and result values, plus the typed shape of the
//! review API response.

use crate::error::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One attempt at fetching one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page_index: u32,
    /// Attempts already made for this page
    pub retry_count: u32,
}

impl PageRequest {
    /// First attempt for a page
    pub fn first(page_index: u32) -> Self {
        Self {
            page_index,
            retry_count: 0,
        }
    }

    /// The next attempt for the same page
    #[must_use]
    pub fn retry(self) -> Self {
        Self {
            retry_count: self.retry_count + 1,
            ..self
        }
    }
}

/// Outcome of a single page attempt
#[derive(Debug)]
pub enum PageResult {
    /// The page carried at least one review
    Records {
        /// Reviews in the order the API listed them
        items: Vec<RawReview>,
        /// Total page count reported alongside, if any
        declared_total_pages: Option<u32>,
    },
    /// The page had no data or an empty review list
    Empty,
    /// The response did not have the expected structure
    Malformed(String),
    /// Timeout, connection error or non-2xx status
    TransportFailure(Error),
}

impl PageResult {
    /// Check if this is a transport failure
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// Number of items carried (zero for non-record outcomes)
    pub fn item_count(&self) -> usize {
        match self {
            Self::Records { items, .. } => items.len(),
            _ => 0,
        }
    }
}

/// One review as returned by the API.
///
/// Fields are read leniently: a value of an unexpected JSON type is coerced
/// where it can be and dropped otherwise, so one odd field never costs the
/// rest of the page.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawReview {
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_buyer: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub recommendation_status: Option<String>,
}

/// Strings pass through; other scalars and containers keep their JSON text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Numbers and numeric strings; anything else is absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Booleans, `"true"`/`"false"` and 0/1
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    })
}

/// Top-level response body
#[derive(Debug, Deserialize)]
pub(crate) struct ReviewEnvelope {
    #[serde(default)]
    pub data: Option<ReviewData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewData {
    #[serde(default)]
    pub comments: Option<Vec<RawReview>>,
    #[serde(default)]
    pub pager: Option<Pager>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pager {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

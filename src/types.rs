//! Common types used throughout review-harvest
//!
//! This module contains shared type definitions
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Item Identifier
// ============================================================================

/// Numeric key of the catalog item whose reviews are fetched.
///
/// Construction validates the input, so holding an `ItemId` means the
/// identifier is a non-empty run of ASCII digits with a non-zero value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Parse and validate an identifier
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_value("item_id", "identifier is empty"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_value(
                "item_id",
                format!("'{trimmed}' is not a positive integer"),
            ));
        }
        if trimmed.bytes().all(|b| b == b'0') {
            return Err(Error::invalid_value("item_id", "identifier must be non-zero"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Record
// ============================================================================

/// One review, flattened for export.
///
/// Serialized field names are the column headers of the exported sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Display name of the reviewer
    #[serde(rename = "user_name")]
    pub author: String,
    /// Creation time as reported by the API
    #[serde(rename = "created_at")]
    pub timestamp: String,
    /// Review text, if any
    #[serde(rename = "comment_body")]
    pub body_text: Option<String>,
    /// Star rating; whole numbers are written without a fraction
    #[serde(rename = "rating", serialize_with = "serialize_rating")]
    pub rating_value: Option<f64>,
    /// Whether the reviewer bought the item
    #[serde(rename = "is_buyer")]
    pub verified_purchase: bool,
    /// Recommendation status string, e.g. "recommended"
    pub recommendation_status: Option<String>,
}

#[allow(clippy::float_cmp)]
fn serialize_rating<S>(rating: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *rating {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            serializer.serialize_some(&(value as i64))
        }
        Some(value) => serializer.serialize_some(&value),
        None => serializer.serialize_none(),
    }
}

/// Column names in export order
pub const RECORD_COLUMNS: [&str; 6] = [
    "user_name",
    "created_at",
    "comment_body",
    "rating",
    "is_buyer",
    "recommendation_status",
];

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    #[default]
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    Exponential,
}

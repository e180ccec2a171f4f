//! Result aggregation
//!
//! Projects raw reviews into flat [`Record`]s and keeps them in fetch order.

use crate::fetch::RawReview;
use crate::types::Record;

/// Append-only sequence of records across pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultAggregator {
    records: Vec<Record>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's items, preserving their order
    pub fn append(&mut self, items: Vec<RawReview>) -> usize {
        let count = items.len();
        self.records.extend(items.into_iter().map(project));
        count
    }

    /// Current records in fetch order
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records have been appended
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Field projection from the API shape to the export shape
fn project(raw: RawReview) -> Record {
    Record {
        author: raw.user_name.unwrap_or_default(),
        timestamp: raw.created_at.unwrap_or_default(),
        body_text: raw.body,
        rating_value: raw.rate,
        verified_purchase: raw.is_buyer.unwrap_or(false),
        recommendation_status: raw.recommendation_status,
    }
}

//! Arrow schema for review records
//!
//! The record shape is fixed, so the schema is declared rather than inferred.

use crate::error::Result;
use crate::types::{Record, RECORD_COLUMNS};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Schema with one column per [`Record`] field, in export order
pub fn record_schema() -> Schema {
    let [user_name, created_at, comment_body, rating, is_buyer, recommendation_status] =
        RECORD_COLUMNS;

    Schema::new(vec![
        Field::new(user_name, DataType::Utf8, false),
        Field::new(created_at, DataType::Utf8, false),
        Field::new(comment_body, DataType::Utf8, true),
        Field::new(rating, DataType::Float64, true),
        Field::new(is_buyer, DataType::Boolean, false),
        Field::new(recommendation_status, DataType::Utf8, true),
    ])
}

/// Convert records to a single RecordBatch
pub fn records_to_arrow(records: &[Record]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.author.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.timestamp.as_str()),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.body_text.as_deref())
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.rating_value).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            records
                .iter()
                .map(|r| r.verified_purchase)
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.recommendation_status.as_deref())
                .collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(record_schema()), columns)?)
}

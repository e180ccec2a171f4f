//! Output module
//!
//! Hands the final record sequence to a file.
//!
//! # Overview
//!
//! This module provides:
//! - The [`Exporter`] trait and xlsx, CSV, Parquet and JSON implementations
//! - A fixed Arrow schema for review records
//! - Non-colliding output file names

mod exporter;
mod naming;
mod schema;
mod writer;

pub use exporter::{
    exporter_for, CsvExporter, ExportFormat, ExportSummary, Exporter, JsonExporter,
    OutputTarget, ParquetExporter, XlsxExporter, SHEET_NAME,
};
pub use naming::{create_unique_file, create_unique_file_at};
pub use schema::{record_schema, records_to_arrow};
pub use writer::{write_batch_to_parquet, ParquetWriterConfig};

//! Record exporters
//!
//! Each exporter writes the final record sequence once, to a fresh file
//! whose name never overwrites an existing one.

use super::naming::create_unique_file;
use super::schema::records_to_arrow;
use super::writer::{write_batch_to_parquet, ParquetWriterConfig};
use crate::error::{Result, ResultExt};
use crate::types::{Record, RECORD_COLUMNS};
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Worksheet holding the reviews in an xlsx export
pub const SHEET_NAME: &str = "Comments";

/// File format for exported records
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook with a single `Comments` sheet
    #[default]
    Xlsx,
    /// Comma-separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
    /// Pretty-printed JSON array
    Json,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Json => "json",
        }
    }
}

/// Where exported files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Directory for output files (created if missing)
    pub directory: PathBuf,
    /// File name without extension
    pub file_stem: String,
}

impl OutputTarget {
    /// Create a target
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
        }
    }

    /// Create a fresh file for `format`
    fn create(&self, format: ExportFormat) -> Result<(PathBuf, File)> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                self.directory.display()
            )
        })?;
        create_unique_file(&self.directory, &self.file_stem, format.extension())
    }
}

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File written
    pub path: PathBuf,
    /// Rows written
    pub rows: usize,
}

/// Consumer of the final record sequence
pub trait Exporter {
    /// Format this exporter writes
    fn format(&self) -> ExportFormat;

    /// Write `records` in order
    fn export(&self, records: Vec<Record>) -> Result<ExportSummary>;
}

/// Build the exporter for `format`
pub fn exporter_for(format: ExportFormat, target: OutputTarget) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Xlsx => Box::new(XlsxExporter::new(target)),
        ExportFormat::Csv => Box::new(CsvExporter::new(target)),
        ExportFormat::Parquet => Box::new(ParquetExporter::new(target)),
        ExportFormat::Json => Box::new(JsonExporter::new(target)),
    }
}

// ============================================================================
// XLSX
// ============================================================================

/// Writes an Excel workbook with a header row
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    target: OutputTarget,
}

impl XlsxExporter {
    /// Create an xlsx exporter
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl Exporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn export(&self, records: Vec<Record>) -> Result<ExportSummary> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, name) in RECORD_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *name)?;
        }
        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            sheet.write_string(row, 0, &record.author)?;
            sheet.write_string(row, 1, &record.timestamp)?;
            if let Some(body) = &record.body_text {
                sheet.write_string(row, 2, body)?;
            }
            if let Some(rating) = record.rating_value {
                sheet.write_number(row, 3, rating)?;
            }
            sheet.write_boolean(row, 4, record.verified_purchase)?;
            if let Some(status) = &record.recommendation_status {
                sheet.write_string(row, 5, status)?;
            }
        }

        // Build the workbook before claiming a file name
        let (path, file) = self.target.create(self.format())?;
        workbook.save_to_writer(file)?;

        info!("Excel file saved as {}", path.display());
        Ok(ExportSummary {
            path,
            rows: records.len(),
        })
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Writes a CSV sheet with a header row
#[derive(Debug, Clone)]
pub struct CsvExporter {
    target: OutputTarget,
}

impl CsvExporter {
    /// Create a CSV exporter
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, records: Vec<Record>) -> Result<ExportSummary> {
        let (path, file) = self.target.create(self.format())?;

        // Header written by hand so an empty export still has columns
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(RECORD_COLUMNS)?;
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!("CSV file saved as {}", path.display());
        Ok(ExportSummary {
            path,
            rows: records.len(),
        })
    }
}

// ============================================================================
// Parquet
// ============================================================================

/// Writes a Parquet file with the fixed record schema
#[derive(Debug, Clone)]
pub struct ParquetExporter {
    target: OutputTarget,
    config: ParquetWriterConfig,
}

impl ParquetExporter {
    /// Create a Parquet exporter with default writer settings
    pub fn new(target: OutputTarget) -> Self {
        Self {
            target,
            config: ParquetWriterConfig::default(),
        }
    }

    /// Override writer settings
    #[must_use]
    pub fn with_config(mut self, config: ParquetWriterConfig) -> Self {
        self.config = config;
        self
    }
}

impl Exporter for ParquetExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Parquet
    }

    fn export(&self, records: Vec<Record>) -> Result<ExportSummary> {
        let batch = records_to_arrow(&records)?;
        let (path, file) = self.target.create(self.format())?;
        let rows = write_batch_to_parquet(file, &batch, &self.config)?;

        info!("Parquet file saved as {}", path.display());
        Ok(ExportSummary { path, rows })
    }
}

// ============================================================================
// JSON
// ============================================================================

/// Writes a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonExporter {
    target: OutputTarget,
}

impl JsonExporter {
    /// Create a JSON exporter
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, records: Vec<Record>) -> Result<ExportSummary> {
        let (path, file) = self.target.create(self.format())?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writer.flush()?;

        info!("JSON file saved as {}", path.display());
        Ok(ExportSummary {
            path,
            rows: records.len(),
        })
    }
}

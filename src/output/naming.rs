//! Output file naming
//!
//! Files are opened with `create_new`, so an existing file is never
//! truncated, including one that appears after a name was considered.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Create a fresh file in `dir`.
///
/// Tries `stem.ext` first, then `stem-<timestamp>.ext` where the timestamp is
/// ISO-8601 with `:` and `.` replaced by `-`, then numbered variants of that.
pub fn create_unique_file(dir: &Path, stem: &str, extension: &str) -> Result<(PathBuf, File)> {
    create_unique_file_at(dir, stem, extension, Utc::now())
}

/// [`create_unique_file`] with an explicit clock reading
pub fn create_unique_file_at(
    dir: &Path,
    stem: &str,
    extension: &str,
    now: DateTime<Utc>,
) -> Result<(PathBuf, File)> {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");

    let mut attempt = 0u32;
    loop {
        let path = match attempt {
            0 => dir.join(format!("{stem}.{extension}")),
            1 => dir.join(format!("{stem}-{timestamp}.{extension}")),
            n => dir.join(format!("{stem}-{timestamp}-{}.{extension}", n - 1)),
        };

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(Error::output(format!(
                    "Failed to create '{}': {e}",
                    path.display()
                )))
            }
        }
    }
}

//! Input records: one row per grid cell.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GridmorphError;

/// A grid cell: projected coordinate plus the magnitude being classified.
///
/// Records are immutable once loaded; points refer to them by index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Easting (or longitude for Mercator data).
    pub x: f64,
    /// Northing (or latitude for Mercator data).
    pub y: f64,
    /// Magnitude used for classification.
    pub value: f64,
}

impl Record {
    /// Record from its three fields.
    #[must_use]
    pub const fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }
}

/// Read records from CSV with `x`, `y` and `value` header columns. Extra
/// columns are ignored.
///
/// # Errors
///
/// Returns [`GridmorphError::DataLoad`] naming the offending row if a row
/// is missing a column or holds a non-numeric value.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>, GridmorphError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|e| {
            GridmorphError::DataLoad(format!("row {}: {e}", row + 1))
        })?;
        records.push(record);
    }
    log::debug!("read {} records", records.len());
    Ok(records)
}

/// Read records from a CSV file on disk.
///
/// # Errors
///
/// Returns [`GridmorphError::Io`] if the file cannot be opened, otherwise
/// as [`read_csv`].
pub fn load_csv(path: &Path) -> Result<Vec<Record>, GridmorphError> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}

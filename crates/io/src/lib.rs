//! `stocktake-io` — tabular sources and report export.
//!
//! Loads catalog and scan files (CSV or Excel) into loosely-typed raw
//! records for the engine's validator, and writes finished reports back out
//! as xlsx worksheets. One-way conversions in both directions.

pub mod csv;
pub mod error;
pub mod xlsx;

pub use error::IoError;

use std::path::Path;

use serde_json::{Map, Value};

/// Column name → cell value; absent cells are simply missing keys.
/// Matches `stocktake_engine::RawRecord`.
pub type RawRecord = Map<String, Value>;

/// Load raw records from a dataset file, dispatching on extension:
/// `.xlsx`/`.xls`/`.xlsb`/`.ods` go through calamine, everything else is
/// treated as delimited text.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, IoError> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("xlsx") | Some("xls") | Some("xlsb") | Some("ods") => xlsx::read_records(path),
        _ => csv::read_records(path),
    }
}

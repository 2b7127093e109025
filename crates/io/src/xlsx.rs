// Excel dataset import (xlsx, xls, xlsb, ods) and report export (xlsx only)
//
// Import: first worksheet only, header row keys. One-way conversion into
// loosely-typed raw records; nothing round-trips.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::IoError;
use crate::RawRecord;

/// Read the first worksheet into raw records keyed by its header row.
///
/// Numeric cells stay numeric (dates commonly arrive as raw serial numbers —
/// interpreting those is the engine's timestamp normalizer's job). Empty
/// cells omit the key entirely, so the validator's presence check treats
/// them as absent, matching how spreadsheet-to-JSON conversion behaves in
/// the upstream tooling.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, IoError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IoError::Workbook(format!("{}: {e}", path.display())))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IoError::EmptyWorkbook(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::Workbook(format!("sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = RawRecord::new();
        for (i, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(i).filter(|h| !h.is_empty()) else {
                continue;
            };
            if let Some(value) = cell_to_value(cell) {
                record.insert(header.clone(), value);
            }
        }
        // Fully blank rows are common padding at the bottom of exports.
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(Value::String(s.clone()))
            }
        }
        // Integral floats become JSON integers so barcodes coerced to text
        // read "4011", not "4011.0".
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(Value::Number(Number::from(*n as i64)))
            } else {
                Number::from_f64(*n).map(Value::Number)
            }
        }
        Data::Int(n) => Some(Value::Number(Number::from(*n))),
        Data::Bool(b) => Some(Value::Bool(*b)),
        // Date cells surface as their raw serial; the normalizer owns epoch
        // conversion and the 1900 leap-year correction.
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if serial.fract() == 0.0 && serial.abs() < 1e15 {
                Some(Value::Number(Number::from(serial as i64)))
            } else {
                Number::from_f64(serial).map(Value::Number)
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(_) => None,
    }
}

/// Write report rows as a single xlsx worksheet: bold header row from the
/// rows' serialized field order, one row per record.
pub fn write_report<T: Serialize>(
    path: &Path,
    sheet_name: &str,
    rows: &[T],
) -> Result<(), IoError> {
    let maps: Vec<RawRecord> = rows
        .iter()
        .map(|row| match serde_json::to_value(row) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(IoError::Write("report rows must serialize as objects".into())),
            Err(e) => Err(IoError::Write(e.to_string())),
        })
        .collect::<Result<_, _>>()?;

    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(|e| IoError::Write(format!("sheet '{sheet_name}': {e}")))?;

    let headers: Vec<&String> = maps.first().map(|m| m.keys().collect()).unwrap_or_default();

    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header.as_str(), &bold)
            .map_err(|e| IoError::Write(e.to_string()))?;
    }

    for (i, map) in maps.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, header) in headers.iter().enumerate() {
            let col = col as u16;
            match map.get(header.as_str()) {
                Some(Value::Number(n)) => {
                    worksheet
                        .write_number(row, col, n.as_f64().unwrap_or(0.0))
                        .map_err(|e| IoError::Write(e.to_string()))?;
                }
                Some(Value::String(s)) => {
                    worksheet
                        .write_string(row, col, s)
                        .map_err(|e| IoError::Write(e.to_string()))?;
                }
                Some(Value::Bool(b)) => {
                    worksheet
                        .write_boolean(row, col, *b)
                        .map_err(|e| IoError::Write(e.to_string()))?;
                }
                _ => {}
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_become_integers_when_integral() {
        assert_eq!(
            cell_to_value(&Data::Float(4011.0)),
            Some(Value::Number(Number::from(4011)))
        );
        assert_eq!(
            cell_to_value(&Data::Float(2.5)),
            Some(Value::Number(Number::from_f64(2.5).unwrap()))
        );
    }

    #[test]
    fn blank_cells_are_absent() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(cell_to_value(&Data::String(String::new())), None);
    }
}

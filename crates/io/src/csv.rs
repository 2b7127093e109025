// CSV/TSV dataset import

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::IoError;
use crate::RawRecord;

/// Read a delimited text file into raw records, one per data row, keyed by
/// the header row. All values arrive as strings; the engine's validator
/// owns numeric coercion.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    records_from_string(&content, delimiter)
}

pub fn records_from_string(content: &str, delimiter: u8) -> Result<Vec<RawRecord>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IoError::Csv(e.to_string()))?;
        let mut record = RawRecord::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            // Short rows leave trailing columns absent, so the validator's
            // required-field check sees them as missing.
            if let Some(value) = row.get(i) {
                record.insert(header.clone(), Value::String(value.to_string()));
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few lines. The candidate producing the most consistent field count
/// (>1 field) wins; comma on no signal.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1).
fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keyed_string_values() {
        let csv = "Sheet Name,Location,Item Barcode,Quantity,Date\n\
                   Sheet1,Aisle 1,4011,3,2024-01-15\n";
        let records = records_from_string(csv, b',').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Item Barcode"], Value::String("4011".into()));
        assert_eq!(records[0]["Quantity"], Value::String("3".into()));
    }

    #[test]
    fn short_rows_omit_trailing_keys() {
        let csv = "Location,Quantity,Date\nAisle 1,3\n";
        let records = records_from_string(csv, b',').unwrap();
        assert!(records[0].contains_key("Quantity"));
        assert!(!records[0].contains_key("Date"));
    }

    #[test]
    fn sniffs_semicolons() {
        let content = "a;b;c\n1;2;3\n4;5;6\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniffs_tabs_over_commas() {
        let content = "a\tb\tc\n1\t2\t3\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }
}

use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File read error.
    Read(String),
    /// Workbook open / sheet range error.
    Workbook(String),
    /// The workbook has no sheets.
    EmptyWorkbook(String),
    /// CSV parse error.
    Csv(String),
    /// Report export error.
    Write(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {msg}"),
            Self::Workbook(msg) => write!(f, "workbook error: {msg}"),
            Self::EmptyWorkbook(path) => write!(f, "workbook has no sheets: {path}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Write(msg) => write!(f, "write error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

use std::fmt;

/// Errors from the engine's only fallible surface: audit job configs.
/// Reconciliation and report building themselves never fail — malformed
/// rows are dropped, bad dates become the sort-last sentinel, and unmatched
/// barcodes are first-class outcomes.
#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no reports requested, blank file, etc.).
    ConfigValidation(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A TOML-described audit run: which catalog and scan files to load, which
/// locations to scope to, and which reports to produce.
///
/// ```toml
/// name = "March stocktake"
///
/// [catalog]
/// file = "item-master.xlsx"
///
/// [scans]
/// file = "scans.xlsx"
///
/// locations = ["Aisle 1", "Aisle 2"]
/// reports = ["location_wise", "nof"]
///
/// [output]
/// format = "json"
/// file = "reports.json"
/// ```
#[derive(Debug, Deserialize)]
pub struct AuditConfig {
    pub name: String,
    pub catalog: DatasetConfig,
    pub scans: DatasetConfig,
    /// Empty means unrestricted — include all locations.
    #[serde(default)]
    pub locations: Vec<String>,
    pub reports: Vec<ReportKind>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatasetConfig {
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    LocationWise,
    Consolidated,
    Nof,
    BarcodeWise,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocationWise => write!(f, "location_wise"),
            Self::Consolidated => write!(f, "consolidated"),
            Self::Nof => write!(f, "nof"),
            Self::BarcodeWise => write!(f, "barcode_wise"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl AuditConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        let config: AuditConfig =
            toml::from_str(toml_str).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.reports.is_empty() {
            return Err(EngineError::ConfigValidation(
                "at least one report kind is required".into(),
            ));
        }
        if self.catalog.file.trim().is_empty() {
            return Err(EngineError::ConfigValidation("catalog file is blank".into()));
        }
        if self.scans.file.trim().is_empty() {
            return Err(EngineError::ConfigValidation("scans file is blank".into()));
        }
        Ok(())
    }
}

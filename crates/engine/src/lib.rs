//! `stocktake-engine` — Item-master vs. scan-event reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded raw records, returns ordered
//! report rows. No CLI or IO dependencies.

pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod report;
pub mod timestamp;
pub mod totals;
pub mod validate;

pub use config::{AuditConfig, ReportKind};
pub use error::EngineError;
pub use matcher::CatalogIndex;
pub use model::{CatalogItem, LocationFilter, LocationOption, ScanEvent};
pub use timestamp::{normalize, ScanInstant};
pub use validate::{validate_catalog, validate_scans, RawRecord};

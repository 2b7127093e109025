//! The `report`, `run`, and `locations` commands.

use std::path::{Path, PathBuf};

use serde_json::Value;

use stocktake_engine::config::{AuditConfig, OutputFormat, ReportKind};
use stocktake_engine::model::{unique_locations, CatalogItem, LocationFilter, ScanEvent};
use stocktake_engine::{report, validate_catalog, validate_scans};

use crate::exit_codes::EXIT_EMPTY_REPORT;
use crate::render;
use crate::CliError;

/// One built report, whichever shape it came out as.
enum BuiltReport {
    LocationWise(Vec<stocktake_engine::model::LocationWiseRow>),
    Consolidated(Vec<stocktake_engine::model::ConsolidatedRow>),
    Nof(Vec<stocktake_engine::model::NofRow>),
    BarcodeWise(Vec<stocktake_engine::model::BarcodeWiseRow>),
}

impl BuiltReport {
    fn build(
        kind: ReportKind,
        catalog: &[CatalogItem],
        scans: &[ScanEvent],
        filter: &LocationFilter,
    ) -> Self {
        match kind {
            ReportKind::LocationWise => {
                Self::LocationWise(report::location_wise(catalog, scans, filter))
            }
            ReportKind::Consolidated => Self::Consolidated(report::consolidated(scans, filter)),
            ReportKind::Nof => Self::Nof(report::nof(catalog, scans, filter)),
            // Global by contract: the builder takes no filter.
            ReportKind::BarcodeWise => Self::BarcodeWise(report::barcode_wise(catalog, scans)),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::LocationWise(rows) => rows.len(),
            Self::Consolidated(rows) => rows.len(),
            Self::Nof(rows) => rows.len(),
            Self::BarcodeWise(rows) => rows.len(),
        }
    }

    fn to_json(&self) -> Result<Value, CliError> {
        let result = match self {
            Self::LocationWise(rows) => serde_json::to_value(rows),
            Self::Consolidated(rows) => serde_json::to_value(rows),
            Self::Nof(rows) => serde_json::to_value(rows),
            Self::BarcodeWise(rows) => serde_json::to_value(rows),
        };
        result.map_err(|e| CliError::load(e.to_string()))
    }

    fn render(&self) -> String {
        match self {
            Self::LocationWise(rows) => render::render_location_wise(rows),
            Self::Consolidated(rows) => render::render_consolidated(rows),
            Self::Nof(rows) => render::render_nof(rows),
            Self::BarcodeWise(rows) => render::render_barcode_wise(rows),
        }
    }

    fn sheet_name(&self) -> &'static str {
        match self {
            Self::LocationWise(_) => "Location Wise Report",
            Self::Consolidated(_) => "Consolidated Report",
            Self::Nof(_) => "NOF Report",
            Self::BarcodeWise(_) => "Barcode Wise Report",
        }
    }

    fn write_xlsx(&self, path: &Path) -> Result<(), CliError> {
        let result = match self {
            Self::LocationWise(rows) => stocktake_io::xlsx::write_report(path, self.sheet_name(), rows),
            Self::Consolidated(rows) => stocktake_io::xlsx::write_report(path, self.sheet_name(), rows),
            Self::Nof(rows) => stocktake_io::xlsx::write_report(path, self.sheet_name(), rows),
            Self::BarcodeWise(rows) => stocktake_io::xlsx::write_report(path, self.sheet_name(), rows),
        };
        result.map_err(|e| CliError::load(format!("{}: {}", path.display(), e)))
    }
}

fn load_catalog(path: &Path, quiet: bool) -> Result<Vec<CatalogItem>, CliError> {
    let records = stocktake_io::read_records(path)
        .map_err(|e| CliError::load(format!("{}: {}", path.display(), e)))?;
    let items = validate_catalog(&records);
    let dropped = records.len() - items.len();
    if dropped > 0 && !quiet {
        eprintln!("note: {} catalog rows dropped (missing required fields)", dropped);
    }
    Ok(items)
}

fn load_scans(path: &Path, quiet: bool) -> Result<Vec<ScanEvent>, CliError> {
    let records = stocktake_io::read_records(path)
        .map_err(|e| CliError::load(format!("{}: {}", path.display(), e)))?;
    let scans = validate_scans(&records);
    let dropped = records.len() - scans.len();
    if dropped > 0 && !quiet {
        eprintln!("note: {} scan rows dropped (missing required fields)", dropped);
    }
    Ok(scans)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_report(
    kind: ReportKind,
    catalog: PathBuf,
    scans: PathBuf,
    locations: Vec<String>,
    json: bool,
    output: Option<PathBuf>,
    xlsx: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let catalog = load_catalog(&catalog, quiet)?;
    let scans = load_scans(&scans, quiet)?;
    let filter = LocationFilter::from_values(locations);

    let built = BuiltReport::build(kind, &catalog, &scans, &filter);

    if let Some(path) = &xlsx {
        built.write_xlsx(path)?;
    }
    if let Some(path) = &output {
        let bytes = serde_json::to_vec_pretty(&built.to_json()?)
            .map_err(|e| CliError::load(e.to_string()))?;
        std::fs::write(path, bytes)
            .map_err(|e| CliError::load(format!("{}: {}", path.display(), e)))?;
    }

    if json {
        let pretty = serde_json::to_string_pretty(&built.to_json()?)
            .map_err(|e| CliError::load(e.to_string()))?;
        println!("{}", pretty);
    } else if output.is_none() && xlsx.is_none() {
        print!("{}", built.render());
    }

    if !quiet {
        eprintln!("{}: {} rows", kind, built.len());
    }

    if built.len() == 0 {
        return Err(CliError {
            code: EXIT_EMPTY_REPORT,
            message: String::new(),
            hint: None,
        });
    }
    Ok(())
}

pub fn cmd_run(job: PathBuf, quiet: bool) -> Result<(), CliError> {
    let toml_str = std::fs::read_to_string(&job)
        .map_err(|e| CliError::config(format!("{}: {}", job.display(), e)))?;
    let config = AuditConfig::from_toml(&toml_str).map_err(|e| {
        CliError::config(format!("{}: {}", job.display(), e))
            .with_hint("see `stocktake run --help` for the config shape")
    })?;

    // Paths inside the config resolve relative to the config file.
    let base = job.parent().unwrap_or_else(|| Path::new("."));
    let catalog = load_catalog(&base.join(&config.catalog.file), quiet)?;
    let scans = load_scans(&base.join(&config.scans.file), quiet)?;
    let filter = LocationFilter::from_values(config.locations.iter().cloned());

    match config.output.format {
        OutputFormat::Text => {
            for kind in &config.reports {
                let built = BuiltReport::build(*kind, &catalog, &scans, &filter);
                println!("== {} ({}) ==", kind, config.name);
                print!("{}", built.render());
                if !quiet {
                    eprintln!("{}: {} rows", kind, built.len());
                }
            }
        }
        OutputFormat::Json => {
            let mut combined = serde_json::Map::new();
            for kind in &config.reports {
                let built = BuiltReport::build(*kind, &catalog, &scans, &filter);
                if !quiet {
                    eprintln!("{}: {} rows", kind, built.len());
                }
                combined.insert(kind.to_string(), built.to_json()?);
            }
            let pretty = serde_json::to_string_pretty(&Value::Object(combined))
                .map_err(|e| CliError::load(e.to_string()))?;
            match &config.output.file {
                Some(file) => {
                    let path = base.join(file);
                    std::fs::write(&path, pretty.as_bytes())
                        .map_err(|e| CliError::load(format!("{}: {}", path.display(), e)))?;
                }
                None => println!("{}", pretty),
            }
        }
    }

    Ok(())
}

pub fn cmd_locations(scans: PathBuf, json: bool) -> Result<(), CliError> {
    let scans = load_scans(&scans, true)?;
    let options = unique_locations(&scans);

    if json {
        let pretty = serde_json::to_string_pretty(&options)
            .map_err(|e| CliError::load(e.to_string()))?;
        println!("{}", pretty);
    } else {
        for option in &options {
            println!("{}", option.label);
        }
    }
    Ok(())
}

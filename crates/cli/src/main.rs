// Stocktake CLI - headless reconciliation reports

mod events;
mod exit_codes;
mod render;
mod report_cmd;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use stocktake_engine::ReportKind;

// Re-export exit codes from registry (single source of truth)
use exit_codes::{EXIT_CONFIG, EXIT_LOAD, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "Item-master vs. scan-event reconciliation reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single report from a catalog file and a scan file
    #[command(after_help = "\
Examples:
  stocktake report location-wise --catalog master.xlsx --scans counts.xlsx
  stocktake report consolidated --catalog master.xlsx --scans counts.csv --location 'Aisle 1'
  stocktake report nof --catalog master.xlsx --scans counts.xlsx --json | jq length
  stocktake report barcode-wise --catalog master.xlsx --scans counts.xlsx --xlsx totals.xlsx

Exit codes:
  0  Report produced
  3  Catalog or scan file unreadable
  5  Report came back empty")]
    Report {
        /// Which report to build
        kind: ReportKindArg,

        /// Item master file (xlsx, xls, xlsb, ods, or csv)
        #[arg(long)]
        catalog: PathBuf,

        /// Scan events file (xlsx, xls, xlsb, ods, or csv)
        #[arg(long)]
        scans: PathBuf,

        /// Restrict to a location (repeatable; omit for all locations)
        #[arg(long)]
        location: Vec<String>,

        /// Print rows as JSON to stdout instead of a table
        #[arg(long)]
        json: bool,

        /// Write rows as JSON to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write the report as a formatted workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Suppress the stderr summary line
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Run every report named in an audit job config
    #[command(after_help = "\
Examples:
  stocktake run audit.toml
  stocktake run audit.toml --quiet

File paths inside the config resolve relative to the config file's directory.")]
    Run {
        /// Audit job config (TOML)
        job: PathBuf,

        /// Suppress stderr summary lines
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List the distinct locations found in a scan file
    #[command(after_help = "\
Examples:
  stocktake locations counts.xlsx
  stocktake locations counts.csv --json")]
    Locations {
        /// Scan events file
        scans: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage stored stocktake event records
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// Add or update an event record (matched by event id)
    Add {
        /// Event identifier
        id: String,

        /// Customer name
        #[arg(long)]
        customer: Option<String>,

        /// Customer identifier
        #[arg(long)]
        customer_id: Option<String>,

        /// Outlet address
        #[arg(long)]
        address: Option<String>,

        /// Date of the stock count (free text, e.g. 2026-03-14)
        #[arg(long)]
        date: Option<String>,

        /// Time of the stock count
        #[arg(long)]
        time: Option<String>,

        /// Total locations counted
        #[arg(long)]
        locations: Option<u32>,

        /// Audit-side supervisor
        #[arg(long)]
        audit_supervisor: Option<String>,

        /// Customer-side supervisor
        #[arg(long)]
        customer_supervisor: Option<String>,

        /// Store file (default: platform config dir)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List stored events
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Store file (default: platform config dir)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show one event as JSON
    Show {
        /// Event identifier
        id: String,

        /// Store file (default: platform config dir)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Remove an event record
    Remove {
        /// Event identifier
        id: String,

        /// Store file (default: platform config dir)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKindArg {
    LocationWise,
    Consolidated,
    Nof,
    BarcodeWise,
}

impl From<ReportKindArg> for ReportKind {
    fn from(arg: ReportKindArg) -> Self {
        match arg {
            ReportKindArg::LocationWise => ReportKind::LocationWise,
            ReportKindArg::Consolidated => ReportKind::Consolidated,
            ReportKindArg::Nof => ReportKind::Nof,
            ReportKindArg::BarcodeWise => ReportKind::BarcodeWise,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: stocktake <command> [options]");
            eprintln!("       stocktake --help for more information");
            Ok(())
        }
        Some(Commands::Report {
            kind,
            catalog,
            scans,
            location,
            json,
            output,
            xlsx,
            quiet,
        }) => report_cmd::cmd_report(kind.into(), catalog, scans, location, json, output, xlsx, quiet),
        Some(Commands::Run { job, quiet }) => report_cmd::cmd_run(job, quiet),
        Some(Commands::Locations { scans, json }) => report_cmd::cmd_locations(scans, json),
        Some(Commands::Event { command }) => match command {
            EventCommands::Add {
                id,
                customer,
                customer_id,
                address,
                date,
                time,
                locations,
                audit_supervisor,
                customer_supervisor,
                store,
            } => events::cmd_add(
                id,
                customer,
                customer_id,
                address,
                date,
                time,
                locations,
                audit_supervisor,
                customer_supervisor,
                store,
            ),
            EventCommands::List { json, store } => events::cmd_list(json, store),
            EventCommands::Show { id, store } => events::cmd_show(id, store),
            EventCommands::Remove { id, store } => events::cmd_remove(id, store),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self { code: EXIT_LOAD, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

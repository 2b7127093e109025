use serde::Serialize;

/// Description emitted for scan events whose barcode has no catalog entry.
pub const NOT_ON_FILE: &str = "Barcode Not in Item Master";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A validated item-master row. Immutable once validated.
///
/// `upc` uniqueness is NOT guaranteed by the source data; when duplicates
/// exist the earliest-declared item wins every lookup (see [`crate::matcher`]).
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub bu_code: String,
    pub bu_id: String,
    pub worksheet_id: String,
    pub inventory_item_id: String,
    pub item_type: String,
    pub category: String,
    pub upc: String,
    pub description: String,
    pub uom: String,
    pub multiplier: f64,
}

/// A validated scan event. Quantity is passed through unchanged, including
/// zero and negative values — correctness of counts is not this crate's job.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    pub sheet_name: String,
    pub location: String,
    pub barcode: String,
    pub quantity: f64,
    /// Legacy column, carried for schema compatibility. Never aggregated.
    pub audited_quantity: f64,
    /// Original date text, in whatever format the source produced.
    /// Normalized lazily per report run by [`crate::timestamp::normalize`].
    pub raw_date: String,
}

// ---------------------------------------------------------------------------
// Location filter
// ---------------------------------------------------------------------------

/// A `{value, label}` pair as presented by location pickers.
/// The engine only ever consumes `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationOption {
    pub value: String,
    pub label: String,
}

/// A set of location values scoping a report run.
///
/// An empty set means "no filtering — include all locations". That is a
/// deliberate policy, not a degenerate case.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    values: Vec<String>,
}

impl LocationFilter {
    pub fn from_options(options: &[LocationOption]) -> Self {
        LocationFilter {
            values: options.iter().map(|o| o.value.clone()).collect(),
        }
    }

    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        LocationFilter {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Unrestricted filter — every location passes.
    pub fn all() -> Self {
        LocationFilter::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.values.is_empty()
    }

    pub fn matches(&self, location: &str) -> bool {
        self.values.is_empty() || self.values.iter().any(|v| v == location)
    }
}

/// Distinct non-blank locations in scan order, as picker options.
pub fn unique_locations(scans: &[ScanEvent]) -> Vec<LocationOption> {
    let mut seen: Vec<&str> = Vec::new();
    for scan in scans {
        if scan.location.trim().is_empty() {
            continue;
        }
        if !seen.contains(&scan.location.as_str()) {
            seen.push(&scan.location);
        }
    }
    seen.into_iter()
        .map(|loc| LocationOption {
            value: loc.to_string(),
            label: loc.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Report rows
// ---------------------------------------------------------------------------

/// One row per filtered scan event, annotated with catalog fields when the
/// barcode is on file. Serialized field names match the source column names
/// so exports line up with the upstream spreadsheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationWiseRow {
    #[serde(rename = "Pur_Ret_UPC")]
    pub upc: String,
    #[serde(rename = "Inventory_Item_ID")]
    pub inventory_item_id: String,
    #[serde(rename = "Item_Description")]
    pub description: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Date")]
    pub date: String,
}

/// One row per distinct location in the filtered scan set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRow {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
}

/// One row per unmatched scan event ("Not On File").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NofRow {
    #[serde(rename = "Item_Barcode")]
    pub barcode: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Date")]
    pub date: String,
}

/// One row per distinct barcode across the entire scan set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeWiseRow {
    #[serde(rename = "Pur_Ret_UPC")]
    pub upc: String,
    #[serde(rename = "Inventory_Item_ID")]
    pub inventory_item_id: String,
    #[serde(rename = "Item_Description")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
}

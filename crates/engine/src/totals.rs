//! Presentation-layer derived values: grand totals and per-location
//! subtotals. Builders emit rows already grouped (location-sorted), so the
//! renderer can take these without re-deriving any matches.

use crate::model::{BarcodeWiseRow, ConsolidatedRow, LocationWiseRow, NofRow};

/// A report row with a summable quantity.
pub trait Quantified {
    fn quantity(&self) -> f64;
}

/// A report row grouped by location.
pub trait Located: Quantified {
    fn location(&self) -> &str;
}

impl Quantified for LocationWiseRow {
    fn quantity(&self) -> f64 {
        self.quantity
    }
}
impl Located for LocationWiseRow {
    fn location(&self) -> &str {
        &self.location
    }
}

impl Quantified for NofRow {
    fn quantity(&self) -> f64 {
        self.quantity
    }
}
impl Located for NofRow {
    fn location(&self) -> &str {
        &self.location
    }
}

impl Quantified for ConsolidatedRow {
    fn quantity(&self) -> f64 {
        self.quantity
    }
}

impl Quantified for BarcodeWiseRow {
    fn quantity(&self) -> f64 {
        self.quantity
    }
}

/// Sum of all emitted quantities.
pub fn grand_total<R: Quantified>(rows: &[R]) -> f64 {
    rows.iter().map(Quantified::quantity).sum()
}

/// A consecutive run of rows sharing one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    pub location: String,
    /// Index of the first row of the run.
    pub start: usize,
    pub len: usize,
    pub subtotal: f64,
}

/// Group boundaries over an already location-sorted row sequence.
/// Runs are consecutive, so a location appearing twice non-adjacently
/// (which sorted builder output never produces) would yield two groups.
pub fn location_groups<R: Located>(rows: &[R]) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match groups.last_mut() {
            Some(group) if group.location == row.location() => {
                group.len += 1;
                group.subtotal += row.quantity();
            }
            _ => groups.push(LocationGroup {
                location: row.location().to_string(),
                start: i,
                len: 1,
                subtotal: row.quantity(),
            }),
        }
    }

    groups
}

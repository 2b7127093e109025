//! Report builders. Each is a pure function over (catalog, scans, filter)
//! with a documented sort or group order; nothing is cached between runs.

use std::collections::HashMap;

use crate::matcher::{match_scans, CatalogIndex};
use crate::model::{
    BarcodeWiseRow, CatalogItem, ConsolidatedRow, LocationFilter, LocationWiseRow, NofRow,
    ScanEvent, NOT_ON_FILE,
};
use crate::timestamp::{self, ScanInstant};

/// One row per filtered scan event, joined against the catalog.
///
/// Sort: location ascending (lexicographic), then normalized timestamp
/// ascending with unparseable dates last. The sort is stable, so events
/// that tie on both keys keep their scan order.
pub fn location_wise(
    catalog: &[CatalogItem],
    scans: &[ScanEvent],
    filter: &LocationFilter,
) -> Vec<LocationWiseRow> {
    let index = CatalogIndex::build(catalog);

    let mut keyed: Vec<(LocationWiseRow, ScanInstant)> = match_scans(&index, scans)
        .into_iter()
        .filter(|matched| filter.matches(&matched.event.location))
        .map(|matched| {
            let scan = matched.event;
            let row = match matched.item {
                Some(item) => LocationWiseRow {
                    upc: item.upc.clone(),
                    inventory_item_id: item.inventory_item_id.clone(),
                    description: item.description.clone(),
                    location: scan.location.clone(),
                    quantity: scan.quantity,
                    date: scan.raw_date.clone(),
                },
                None => LocationWiseRow {
                    upc: scan.barcode.clone(),
                    inventory_item_id: String::new(),
                    description: NOT_ON_FILE.into(),
                    location: scan.location.clone(),
                    quantity: scan.quantity,
                    date: scan.raw_date.clone(),
                },
            };
            // Normalize once per row, not once per comparison.
            (row, timestamp::normalize(&scan.raw_date))
        })
        .collect();

    keyed.sort_by(|a, b| a.0.location.cmp(&b.0.location).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(row, _)| row).collect()
}

/// Per-location quantity totals over the filtered scan set.
///
/// Rows appear in first-occurrence order of each location in the filtered
/// sequence — NOT alphabetized. Consumers rely on this matching upload
/// order; do not "improve" it.
pub fn consolidated(scans: &[ScanEvent], filter: &LocationFilter) -> Vec<ConsolidatedRow> {
    let mut rows: Vec<ConsolidatedRow> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for scan in scans.iter().filter(|scan| filter.matches(&scan.location)) {
        match position.get(scan.location.as_str()) {
            Some(&i) => rows[i].quantity += scan.quantity,
            None => {
                position.insert(&scan.location, rows.len());
                rows.push(ConsolidatedRow {
                    location: scan.location.clone(),
                    quantity: scan.quantity,
                });
            }
        }
    }

    rows
}

/// The unmatched ("Not On File") subset of the filtered scan events, with
/// the same sort policy as [`location_wise`].
pub fn nof(catalog: &[CatalogItem], scans: &[ScanEvent], filter: &LocationFilter) -> Vec<NofRow> {
    let index = CatalogIndex::build(catalog);

    let mut keyed: Vec<(NofRow, ScanInstant)> = match_scans(&index, scans)
        .into_iter()
        .filter(|matched| matched.item.is_none() && filter.matches(&matched.event.location))
        .map(|matched| {
            let scan = matched.event;
            let row = NofRow {
                barcode: scan.barcode.clone(),
                location: scan.location.clone(),
                quantity: scan.quantity,
                date: scan.raw_date.clone(),
            };
            (row, timestamp::normalize(&scan.raw_date))
        })
        .collect();

    keyed.sort_by(|a, b| a.0.location.cmp(&b.0.location).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(row, _)| row).collect()
}

/// Per-barcode quantity totals across the ENTIRE scan set, sorted by barcode
/// ascending. Takes no location filter by design — the report is global, and
/// the missing parameter is the documentation of that.
pub fn barcode_wise(catalog: &[CatalogItem], scans: &[ScanEvent]) -> Vec<BarcodeWiseRow> {
    let index = CatalogIndex::build(catalog);

    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for scan in scans {
        match position.get(scan.barcode.as_str()) {
            Some(&i) => totals[i].1 += scan.quantity,
            None => {
                position.insert(&scan.barcode, totals.len());
                totals.push((scan.barcode.clone(), scan.quantity));
            }
        }
    }

    let mut rows: Vec<BarcodeWiseRow> = totals
        .into_iter()
        .map(|(barcode, quantity)| match index.lookup(&barcode) {
            Some(item) => BarcodeWiseRow {
                upc: barcode,
                inventory_item_id: item.inventory_item_id.clone(),
                description: item.description.clone(),
                quantity,
            },
            None => BarcodeWiseRow {
                upc: barcode,
                inventory_item_id: String::new(),
                description: NOT_ON_FILE.into(),
                quantity,
            },
        })
        .collect();

    rows.sort_by(|a, b| a.upc.cmp(&b.upc));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(upc: &str, item_id: &str, description: &str) -> CatalogItem {
        CatalogItem {
            bu_code: "B1".into(),
            bu_id: "1".into(),
            worksheet_id: "W1".into(),
            inventory_item_id: item_id.into(),
            item_type: "SKU".into(),
            category: "Cat".into(),
            upc: upc.into(),
            description: description.into(),
            uom: "EA".into(),
            multiplier: 1.0,
        }
    }

    fn scan(location: &str, barcode: &str, quantity: f64, date: &str) -> ScanEvent {
        ScanEvent {
            sheet_name: "Sheet1".into(),
            location: location.into(),
            barcode: barcode.into(),
            quantity,
            audited_quantity: 0.0,
            raw_date: date.into(),
        }
    }

    #[test]
    fn location_wise_annotates_and_sentinels() {
        let catalog = vec![item("111", "ITM-1", "Cola 330ml")];
        let scans = vec![
            scan("Aisle 1", "111", 2.0, "2024-01-15 10:30:00"),
            scan("Aisle 1", "999", 1.0, "2024-01-15 11:00:00"),
        ];
        let rows = location_wise(&catalog, &scans, &LocationFilter::all());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Cola 330ml");
        assert_eq!(rows[1].description, NOT_ON_FILE);
        assert_eq!(rows[1].inventory_item_id, "");
        assert_eq!(rows[1].upc, "999");
    }

    #[test]
    fn location_wise_sorts_by_location_then_timestamp() {
        let catalog = vec![item("111", "ITM-1", "Cola")];
        let scans = vec![
            scan("B", "111", 1.0, "2024-01-15 09:00:00"),
            scan("A", "111", 1.0, "2024-01-16 09:00:00"),
            scan("A", "111", 1.0, "2024-01-15 09:00:00"),
        ];
        let rows = location_wise(&catalog, &scans, &LocationFilter::all());
        assert_eq!(rows[0].location, "A");
        assert_eq!(rows[0].date, "2024-01-15 09:00:00");
        assert_eq!(rows[1].date, "2024-01-16 09:00:00");
        assert_eq!(rows[2].location, "B");
    }

    #[test]
    fn unparseable_dates_sort_last_and_stay_stable() {
        let catalog = vec![item("111", "ITM-1", "Cola")];
        let scans = vec![
            scan("A", "111", 1.0, "bogus-1"),
            scan("A", "111", 2.0, "bogus-2"),
            scan("A", "111", 3.0, "2024-01-15 09:00:00"),
        ];
        let rows = location_wise(&catalog, &scans, &LocationFilter::all());
        assert_eq!(rows[0].quantity, 3.0);
        // Relative input order preserved for the unparseable tie
        assert_eq!(rows[1].date, "bogus-1");
        assert_eq!(rows[2].date, "bogus-2");
    }

    #[test]
    fn location_filter_scopes_rows() {
        let catalog = vec![item("111", "ITM-1", "Cola")];
        let scans = vec![
            scan("A", "111", 1.0, ""),
            scan("B", "111", 1.0, ""),
        ];
        let filter = LocationFilter::from_values(["B"]);
        let rows = location_wise(&catalog, &scans, &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "B");
    }

    #[test]
    fn empty_location_is_its_own_bucket() {
        let scans = vec![
            scan("", "111", 2.0, ""),
            scan("A", "111", 1.0, ""),
            scan("", "222", 3.0, ""),
        ];
        let rows = consolidated(&scans, &LocationFilter::all());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location, "");
        assert_eq!(rows[0].quantity, 5.0);
    }

    #[test]
    fn consolidated_preserves_first_appearance_order() {
        let scans = vec![
            scan("Zone C", "1", 1.0, ""),
            scan("Zone A", "1", 2.0, ""),
            scan("Zone C", "1", 3.0, ""),
            scan("Zone B", "1", 4.0, ""),
        ];
        let rows = consolidated(&scans, &LocationFilter::all());
        let order: Vec<&str> = rows.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(order, vec!["Zone C", "Zone A", "Zone B"]);
        assert_eq!(rows[0].quantity, 4.0);
    }

    #[test]
    fn consolidated_conserves_quantity() {
        let scans = vec![
            scan("A", "1", 2.5, ""),
            scan("B", "2", -1.0, ""),
            scan("A", "3", 0.0, ""),
        ];
        let rows = consolidated(&scans, &LocationFilter::all());
        let total: f64 = rows.iter().map(|r| r.quantity).sum();
        let input: f64 = scans.iter().map(|s| s.quantity).sum();
        assert_eq!(total, input);
    }

    #[test]
    fn nof_lists_only_unmatched() {
        let catalog = vec![item("111", "ITM-1", "Cola")];
        let scans = vec![
            scan("A", "111", 2.0, "2024-01-15"),
            scan("A", "999", 1.0, "2024-01-15"),
        ];
        let rows = nof(&catalog, &scans, &LocationFilter::all());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "999");
    }

    #[test]
    fn barcode_wise_ignores_filter_and_sorts_by_barcode() {
        let catalog = vec![item("222", "ITM-2", "Chips")];
        let scans = vec![
            scan("A", "222", 1.0, ""),
            scan("B", "111", 2.0, ""),
            scan("B", "222", 3.0, ""),
        ];
        // Builder takes no filter; totals span all locations.
        let rows = barcode_wise(&catalog, &scans);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].upc, "111");
        assert_eq!(rows[0].description, NOT_ON_FILE);
        assert_eq!(rows[1].upc, "222");
        assert_eq!(rows[1].quantity, 4.0);
        assert_eq!(rows[1].inventory_item_id, "ITM-2");
    }

    #[test]
    fn empty_inputs_yield_empty_reports() {
        let filter = LocationFilter::all();
        assert!(location_wise(&[], &[], &filter).is_empty());
        assert!(consolidated(&[], &filter).is_empty());
        assert!(nof(&[], &[], &filter).is_empty());
        assert!(barcode_wise(&[], &[]).is_empty());
    }

    #[test]
    fn builders_are_idempotent() {
        let catalog = vec![item("111", "ITM-1", "Cola")];
        let scans = vec![
            scan("B", "111", 1.0, "15/01/2024 10:30:00"),
            scan("A", "999", 2.0, ""),
        ];
        let filter = LocationFilter::all();
        assert_eq!(
            location_wise(&catalog, &scans, &filter),
            location_wise(&catalog, &scans, &filter)
        );
        assert_eq!(barcode_wise(&catalog, &scans), barcode_wise(&catalog, &scans));
    }
}

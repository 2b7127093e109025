use std::collections::HashMap;

use crate::model::{CatalogItem, ScanEvent};

/// UPC → first-declared catalog item.
///
/// The item master does not guarantee unique UPCs; when duplicates exist the
/// earliest-declared item wins every lookup. That tie-break is a documented
/// contract, so the index is built with first-insert-wins rather than
/// last-insert-wins.
pub struct CatalogIndex<'a> {
    by_upc: HashMap<&'a str, &'a CatalogItem>,
}

impl<'a> CatalogIndex<'a> {
    pub fn build(catalog: &'a [CatalogItem]) -> Self {
        let mut by_upc = HashMap::with_capacity(catalog.len());
        for item in catalog {
            by_upc.entry(item.upc.as_str()).or_insert(item);
        }
        CatalogIndex { by_upc }
    }

    pub fn lookup(&self, barcode: &str) -> Option<&'a CatalogItem> {
        self.by_upc.get(barcode).copied()
    }
}

/// A scan event paired with its catalog item, or `None` when the barcode is
/// not on file. An unmatched barcode is a first-class outcome, not an error.
pub struct MatchedScan<'a> {
    pub event: &'a ScanEvent,
    pub item: Option<&'a CatalogItem>,
}

/// Join scan events against the catalog index, preserving event order.
/// Pure: invoked fresh for every report run so re-uploaded data is always
/// reflected.
pub fn match_scans<'a>(index: &CatalogIndex<'a>, events: &'a [ScanEvent]) -> Vec<MatchedScan<'a>> {
    events
        .iter()
        .map(|event| MatchedScan {
            event,
            item: index.lookup(&event.barcode),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(upc: &str, item_id: &str) -> CatalogItem {
        CatalogItem {
            bu_code: "B1".into(),
            bu_id: "1".into(),
            worksheet_id: "W1".into(),
            inventory_item_id: item_id.into(),
            item_type: "SKU".into(),
            category: "Cat".into(),
            upc: upc.into(),
            description: format!("Item {item_id}"),
            uom: "EA".into(),
            multiplier: 1.0,
        }
    }

    fn scan(barcode: &str) -> ScanEvent {
        ScanEvent {
            sheet_name: "Sheet1".into(),
            location: "Aisle 1".into(),
            barcode: barcode.into(),
            quantity: 1.0,
            audited_quantity: 0.0,
            raw_date: String::new(),
        }
    }

    #[test]
    fn duplicate_upc_earliest_declared_wins() {
        let catalog = vec![item("111", "A"), item("111", "B")];
        let index = CatalogIndex::build(&catalog);
        assert_eq!(index.lookup("111").unwrap().inventory_item_id, "A");
    }

    #[test]
    fn unmatched_barcode_pairs_with_none() {
        let catalog = vec![item("111", "A")];
        let events = vec![scan("111"), scan("999")];
        let index = CatalogIndex::build(&catalog);
        let matched = match_scans(&index, &events);
        assert_eq!(matched.len(), 2);
        assert!(matched[0].item.is_some());
        assert!(matched[1].item.is_none());
        assert_eq!(matched[1].event.barcode, "999");
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let catalog: Vec<CatalogItem> = Vec::new();
        let events = vec![scan("111")];
        let index = CatalogIndex::build(&catalog);
        let matched = match_scans(&index, &events);
        assert!(matched[0].item.is_none());
    }
}

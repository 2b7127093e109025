use serde_json::{Map, Value};

use crate::model::{CatalogItem, ScanEvent};

/// A loosely-typed row as produced by a tabular source (spreadsheet or CSV):
/// column name → cell value, with absent cells simply missing from the map.
pub type RawRecord = Map<String, Value>;

/// Required-field contract for item-master rows.
pub const CATALOG_REQUIRED: [&str; 10] = [
    "Bu_Code",
    "BU_ID",
    "Worksheet_ID",
    "Inventory_Item_ID",
    "Item_Type",
    "Category",
    "Pur_Ret_UPC",
    "Item_Description",
    "UOM",
    "Multiplier",
];

/// Required-field contract for scan-event rows.
pub const SCAN_REQUIRED: [&str; 5] = ["Sheet Name", "Location", "Item Barcode", "Quantity", "Date"];

/// Validate item-master rows. Rows missing any required column are dropped
/// silently — partial rows are routine in field spreadsheets and must not
/// abort the batch. Input order is preserved.
pub fn validate_catalog(rows: &[RawRecord]) -> Vec<CatalogItem> {
    rows.iter()
        .filter(|row| has_all(row, &CATALOG_REQUIRED))
        .map(|row| CatalogItem {
            bu_code: coerce_string(row.get("Bu_Code")),
            bu_id: coerce_string(row.get("BU_ID")),
            worksheet_id: coerce_string(row.get("Worksheet_ID")),
            inventory_item_id: coerce_string(row.get("Inventory_Item_ID")),
            item_type: coerce_string(row.get("Item_Type")),
            category: coerce_string(row.get("Category")),
            upc: coerce_string(row.get("Pur_Ret_UPC")),
            description: coerce_string(row.get("Item_Description")),
            uom: coerce_string(row.get("UOM")),
            multiplier: coerce_number(row.get("Multiplier")),
        })
        .collect()
}

/// Validate scan-event rows under the scan contract. Same drop-silently
/// policy and order preservation as [`validate_catalog`].
pub fn validate_scans(rows: &[RawRecord]) -> Vec<ScanEvent> {
    rows.iter()
        .filter(|row| has_all(row, &SCAN_REQUIRED))
        .map(|row| ScanEvent {
            sheet_name: coerce_string(row.get("Sheet Name")),
            location: coerce_string(row.get("Location")),
            barcode: coerce_string(row.get("Item Barcode")),
            quantity: coerce_number(row.get("Quantity")),
            audited_quantity: coerce_number(row.get("Audited Quantity")),
            raw_date: coerce_string(row.get("Date")),
        })
        .collect()
}

/// Presence means the key exists — a null cell still counts as present and
/// falls through to the coercion defaults.
fn has_all(row: &RawRecord, required: &[&str]) -> bool {
    required.iter().all(|field| row.contains_key(*field))
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Permissive numeric coercion: numbers pass through, numeric strings parse,
/// everything else (absent, null, non-numeric text) becomes 0. Never fails.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog_row(upc: &str) -> RawRecord {
        let Value::Object(map) = json!({
            "Bu_Code": "B1",
            "BU_ID": 42,
            "Worksheet_ID": "W1",
            "Inventory_Item_ID": "ITM-1",
            "Item_Type": "SKU",
            "Category": "Beverages",
            "Pur_Ret_UPC": upc,
            "Item_Description": "Cola 330ml",
            "UOM": "EA",
            "Multiplier": 1,
        }) else {
            unreachable!()
        };
        map
    }

    fn scan_row(barcode: &str, quantity: Value) -> RawRecord {
        let Value::Object(map) = json!({
            "Sheet Name": "Sheet1",
            "Location": "Aisle 1",
            "Item Barcode": barcode,
            "Quantity": quantity,
            "Date": "2024-01-15T10:30:00",
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn complete_rows_pass() {
        let items = validate_catalog(&[catalog_row("111")]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].upc, "111");
        assert_eq!(items[0].bu_id, "42");
        assert_eq!(items[0].multiplier, 1.0);
    }

    #[test]
    fn missing_required_field_drops_row_silently() {
        let mut bad = catalog_row("222");
        bad.remove("UOM");
        let items = validate_catalog(&[catalog_row("111"), bad, catalog_row("333")]);
        assert_eq!(items.len(), 2);
        // Order preserved
        assert_eq!(items[0].upc, "111");
        assert_eq!(items[1].upc, "333");
    }

    #[test]
    fn null_field_is_present_and_coerces_to_default() {
        let mut row = catalog_row("111");
        row.insert("Item_Description".into(), Value::Null);
        row.insert("Multiplier".into(), Value::Null);
        let items = validate_catalog(&[row]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "");
        assert_eq!(items[0].multiplier, 0.0);
    }

    #[test]
    fn numeric_coercion_is_permissive() {
        let scans = validate_scans(&[
            scan_row("111", json!(5)),
            scan_row("111", json!("3.5")),
            scan_row("111", json!(" 7 ")),
            scan_row("111", json!("three")),
            scan_row("111", json!(-2)),
        ]);
        let quantities: Vec<f64> = scans.iter().map(|s| s.quantity).collect();
        assert_eq!(quantities, vec![5.0, 3.5, 7.0, 0.0, -2.0]);
    }

    #[test]
    fn legacy_columns_optional_but_carried() {
        let mut row = scan_row("111", json!(1));
        row.insert("Audited Quantity".into(), json!(4));
        row.insert("Not Going to Use".into(), json!("ignored"));
        let scans = validate_scans(&[row, scan_row("222", json!(2))]);
        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].audited_quantity, 4.0);
        assert_eq!(scans[1].audited_quantity, 0.0);
    }

    #[test]
    fn scan_contract_enforced() {
        let mut bad = scan_row("111", json!(1));
        bad.remove("Date");
        assert!(validate_scans(&[bad]).is_empty());
    }
}

use serde::Serialize;
use serde_json::Value;

use stocktake_io::{read_records, xlsx};

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Quantity")]
    quantity: f64,
}

#[test]
fn report_export_reads_back_as_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consolidated.xlsx");

    let rows = vec![
        Row { location: "Aisle 1".into(), quantity: 12.0 },
        Row { location: "Aisle 2".into(), quantity: 3.5 },
    ];
    xlsx::write_report(&path, "Consolidated Report", &rows).unwrap();

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Location"], Value::String("Aisle 1".into()));
    // Integral quantities come back as integers
    assert_eq!(records[0]["Quantity"], Value::from(12i64));
    assert_eq!(records[1]["Quantity"], Value::from(3.5));
}

#[test]
fn csv_and_xlsx_agree_on_record_shape() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("scans.csv");
    std::fs::write(
        &csv_path,
        "Sheet Name,Location,Item Barcode,Quantity,Date\n\
         Sheet1,Aisle 1,4011,3,45292\n",
    )
    .unwrap();

    let csv_records = read_records(&csv_path).unwrap();
    assert_eq!(csv_records.len(), 1);
    let record = &csv_records[0];
    for key in ["Sheet Name", "Location", "Item Barcode", "Quantity", "Date"] {
        assert!(record.contains_key(key), "missing {key}");
    }
}

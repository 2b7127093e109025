//! Human-readable table rendering for report rows.
//!
//! Location-grouped reports get a subtotal row injected after each location
//! block and a grand total row at the end, so a printed report reads the way
//! the exported workbook does.

use unicode_width::UnicodeWidthStr;

use stocktake_engine::model::{BarcodeWiseRow, ConsolidatedRow, LocationWiseRow, NofRow};
use stocktake_engine::totals::{grand_total, location_groups, Located};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string to `width` display columns with trailing spaces.
fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// Format a quantity the way the exported sheet shows it: integral values
/// without a decimal point, everything else with full precision.
pub fn fmt_qty(q: f64) -> String {
    if q.fract() == 0.0 && q.abs() < 1e15 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

/// Render a simple aligned table. Column widths come from the widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }

    let mut out = String::new();
    for (i, h) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&pad_right(h, widths[i]));
    }
    out.push('\n');
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*w));
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&pad_right(cell, widths[i]));
        }
        out.push('\n');
    }
    out
}

/// Interleave subtotal rows after each location block, then a grand total
/// row. `to_cells` maps a data row to table cells; `qty_col` is the column
/// the subtotal amount lands in.
fn grouped_table<R, F>(headers: &[&str], rows: &[R], qty_col: usize, to_cells: F) -> String
where
    R: Located,
    F: Fn(&R) -> Vec<String>,
{
    let mut cells: Vec<Vec<String>> = Vec::new();
    for group in location_groups(rows) {
        for row in &rows[group.start..group.start + group.len] {
            cells.push(to_cells(row));
        }
        let mut subtotal_row = vec![String::new(); headers.len()];
        subtotal_row[0] = format!("Subtotal for {}", group.location);
        subtotal_row[qty_col] = fmt_qty(group.subtotal);
        cells.push(subtotal_row);
    }
    cells.push(grand_total_row(headers.len(), qty_col, grand_total(rows)));

    table(headers, &cells)
}

fn grand_total_row(columns: usize, qty_col: usize, total: f64) -> Vec<String> {
    let mut row = vec![String::new(); columns];
    row[0] = "Grand Total".to_string();
    row[qty_col] = fmt_qty(total);
    row
}

pub fn render_location_wise(rows: &[LocationWiseRow]) -> String {
    grouped_table(
        &["UPC", "Item ID", "Description", "Location", "Quantity", "Date"],
        rows,
        4,
        |row| {
            vec![
                row.upc.clone(),
                row.inventory_item_id.clone(),
                row.description.clone(),
                row.location.clone(),
                fmt_qty(row.quantity),
                row.date.clone(),
            ]
        },
    )
}

/// Consolidated rows are already one-per-location totals, so the only
/// derived line is the grand total.
pub fn render_consolidated(rows: &[ConsolidatedRow]) -> String {
    let headers = ["Location", "Quantity"];
    let mut cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![row.location.clone(), fmt_qty(row.quantity)])
        .collect();
    cells.push(grand_total_row(headers.len(), 1, grand_total(rows)));
    table(&headers, &cells)
}

pub fn render_nof(rows: &[NofRow]) -> String {
    grouped_table(
        &["Barcode", "Location", "Quantity", "Date"],
        rows,
        2,
        |row| {
            vec![
                row.barcode.clone(),
                row.location.clone(),
                fmt_qty(row.quantity),
                row.date.clone(),
            ]
        },
    )
}

pub fn render_barcode_wise(rows: &[BarcodeWiseRow]) -> String {
    let headers = ["UPC", "Item ID", "Description", "Quantity"];
    let mut cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.upc.clone(),
                row.inventory_item_id.clone(),
                row.description.clone(),
                fmt_qty(row.quantity),
            ]
        })
        .collect();
    cells.push(grand_total_row(headers.len(), 3, grand_total(rows)));
    table(&headers, &cells)
}

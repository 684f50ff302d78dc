//! B-RISK results workbook (`*_results.xlsx`)
//!
//! One sheet per room (`Room 1`, `Room 2`, ...) plus an `Outside` sheet. The
//! first row holds the column headers. B-RISK pads some sheets with header-less
//! columns, and its column names drift between versions, so headers are
//! filtered and reconciled here before anything else reads them.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use nalgebra::DVector;

use super::error::Result;
use super::table::ResultTable;

/// Column renames applied to every sheet: `(as exported, canonical)`
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("CO Lower(ppm)", "CO Lower (ppm)"),
    ("Layer (m)", "Layer Height (m)"),
];

/// Read every sheet of the workbook, in workbook order
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<ResultTable>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let mut tables = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet)?;
        let rows: Vec<&[Data]> = range.rows().collect();
        let mut table = sheet_to_table(&sheet, &rows)?;
        reconcile_columns(&mut table);
        log::debug!("sheet {sheet}: {} columns, {} rows", table.columns().len(), table.len());
        tables.push(table);
    }

    Ok(tables)
}

/// Apply [`COLUMN_ALIASES`] to a table
pub fn reconcile_columns(table: &mut ResultTable) {
    for (from, to) in COLUMN_ALIASES {
        if table.has_column(from) && !table.has_column(to) {
            table.rename_column(from, to);
        }
    }
}

/// Convert the cells of one sheet; the first row is the header
fn sheet_to_table(name: &str, rows: &[&[Data]]) -> Result<ResultTable> {
    let Some((header, body)) = rows.split_first() else {
        return ResultTable::new(name, Vec::new(), Vec::new());
    };

    // Only text headers name a real column
    let kept: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| match cell {
            Data::String(s) if !s.trim().is_empty() && !s.starts_with("Unnamed") => {
                Some((i, s.trim().to_string()))
            }
            _ => None,
        })
        .collect();

    let columns = kept.iter().map(|(_, name)| name.clone()).collect();
    let data = kept
        .iter()
        .map(|&(i, _)| {
            DVector::from_iterator(
                body.len(),
                body.iter().map(|row| row.get(i).map_or(f64::NAN, cell_value)),
            )
        })
        .collect();

    ResultTable::new(name, columns, data)
}

fn cell_value(cell: &Data) -> f64 {
    match cell {
        Data::Float(v) => *v,
        Data::Int(v) => *v as f64,
        Data::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Data::Bool(b) => f64::from(u8::from(*b)),
        _ => f64::NAN,
    }
}

//! Spreadsheet reader
//!
//! Turns the first worksheet of a workbook into header-keyed rows of
//! loosely-typed cells. Header names are trimmed and lowercased.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_auto};
use thiserror::Error;

/// One spreadsheet cell before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Header → cell
pub type RawRow = HashMap<String, RawCell>;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Failed to open spreadsheet: {0}")]
    Open(String),

    #[error("Workbook has no worksheets")]
    NoSheets,

    #[error("Failed to read sheet '{sheet}': {reason}")]
    Sheet { sheet: String, reason: String },
}

pub fn read_rows_from_path(path: &Path) -> Result<Vec<RawRow>, SpreadsheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SpreadsheetError::Open(e.to_string()))?;
    first_sheet_rows(&mut workbook)
}

/// Parse an uploaded workbook. XLSX is tried first, then legacy XLS.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<RawRow>, SpreadsheetError> {
    if let Ok(mut workbook) = Xlsx::new(Cursor::new(bytes)) {
        return first_sheet_rows(&mut workbook);
    }

    let mut workbook = Xls::new(Cursor::new(bytes))
        .map_err(|e| SpreadsheetError::Open(format!("not an XLSX or XLS workbook: {e}")))?;
    first_sheet_rows(&mut workbook)
}

fn first_sheet_rows<RS: std::io::Read + std::io::Seek, R: Reader<RS>>(
    workbook: &mut R,
) -> Result<Vec<RawRow>, SpreadsheetError> {
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| SpreadsheetError::Sheet {
            sheet: sheet.clone(),
            reason: format!("{e:?}"),
        })?;

    Ok(range_to_rows(&range))
}

/// First row is the header; fully empty rows are dropped.
pub(crate) fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| match to_raw(cell) {
            RawCell::Text(s) => s.trim().to_ascii_lowercase(),
            RawCell::Number(n) => format_number(n),
            RawCell::Bool(b) => b.to_string(),
            RawCell::Empty => String::new(),
        })
        .collect();

    rows.filter_map(|row| {
        let record: RawRow = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.clone(), to_raw(cell)))
            .filter(|(_, cell)| *cell != RawCell::Empty)
            .collect();
        (!record.is_empty()).then_some(record)
    })
    .collect()
}

fn to_raw(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                RawCell::Empty
            } else {
                RawCell::Text(s.clone())
            }
        }
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
    }
}

/// Whole numbers render without a decimal part (phones and ids stored as numbers).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

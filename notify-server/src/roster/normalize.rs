//! Raw spreadsheet rows → [`MemberRecord`]

use chrono::{NaiveDate, TimeDelta};
use shared::models::MemberRecord;

use super::spreadsheet::{RawCell, RawRow, format_number};

const MS_PER_DAY: f64 = 86_400_000.0;

/// 9999-12-31, the last date a spreadsheet can hold
const MAX_SERIAL: f64 = 2_958_465.0;

/// Columns that may hold the date of birth, first match wins
const DOB_COLUMNS: &[&str] = &["dob", "date_of_birth", "birth_date", "birthday"];

pub fn normalize_rows(rows: &[RawRow]) -> Vec<MemberRecord> {
    rows.iter().map(normalize_row).collect()
}

pub fn normalize_row(row: &RawRow) -> MemberRecord {
    MemberRecord {
        membership_id: text(row, "membership_id").unwrap_or_default(),
        name: text(row, "name").unwrap_or_default(),
        email: text(row, "email").unwrap_or_default(),
        phone_primary: text(row, "phoneno_clean"),
        phone_fallback: text(row, "phoneno"),
        date_of_birth: DOB_COLUMNS
            .iter()
            .find_map(|col| row.get(*col))
            .and_then(date_of_birth),
        password: text(row, "password"),
    }
}

/// Trimmed text form of a cell; `None` when absent or blank
fn text(row: &RawRow, column: &str) -> Option<String> {
    let value = match row.get(column)? {
        RawCell::Empty => return None,
        RawCell::Text(s) => s.trim().to_string(),
        RawCell::Number(n) => format_number(*n),
        RawCell::Bool(b) => b.to_string(),
    };
    (!value.is_empty()).then_some(value)
}

fn date_of_birth(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Number(serial) => {
            serial_to_date(*serial).map(|d| d.format("%d/%m/%Y").to_string())
        }
        RawCell::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        RawCell::Empty | RawCell::Bool(_) => None,
    }
}

/// Spreadsheet day serial → calendar date, counting from 1899-12-30 (UTC).
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(-MAX_SERIAL..=MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let offset = TimeDelta::try_milliseconds((serial * MS_PER_DAY).round() as i64)?;
    epoch.checked_add_signed(offset).map(|dt| dt.date())
}

//! Daily birthday greetings

use chrono::{Datelike, NaiveDate};
use shared::error::AppResult;
use shared::models::BirthdaySummary;
use tracing::{debug, info};

use super::DispatchEngine;

const FULL_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Extract `(day, month)` from a stored date of birth.
///
/// Accepts the normalized `DD/MM/YYYY` form, a few common full-date layouts
/// and a bare `DD/MM`.
pub fn parse_day_month(dob: &str) -> Option<(u32, u32)> {
    let dob = dob.trim();
    if dob.is_empty() {
        return None;
    }

    for fmt in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(dob, fmt) {
            return Some((date.day(), date.month()));
        }
    }

    let (day, month) = dob.split_once('/')?;
    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    // Leap year so 29/02 validates
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some((day, month))
}

/// Whether a member born on `dob` celebrates on `today`.
///
/// 29 February birthdays fall on 28 February in non-leap years.
pub fn birthday_matches(dob: &str, today: NaiveDate) -> bool {
    let Some((day, month)) = parse_day_month(dob) else {
        return false;
    };
    if (day, month) == (today.day(), today.month()) {
        return true;
    }
    (day, month) == (29, 2)
        && (today.day(), today.month()) == (28, 2)
        && !is_leap_year(today.year())
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

impl DispatchEngine {
    /// Greet every member whose birthday is `today`, waiting for any running dispatch.
    pub async fn dispatch_birthdays(&self, today: NaiveDate) -> AppResult<BirthdaySummary> {
        let _guard = self.guard.lock().await;

        let mut summary = BirthdaySummary {
            date: today.format("%d/%m").to_string(),
            ..Default::default()
        };

        for member in self.roster.snapshot() {
            let Some(dob) = member.date_of_birth.as_deref() else {
                continue;
            };
            if !birthday_matches(dob, today) {
                continue;
            }
            let Some(phone) = member.effective_phone().map(str::to_string) else {
                debug!(member = %member.display_key(), "Birthday member has no phone");
                continue;
            };

            summary.matched += 1;
            let text = self.templates.render_birthday(&member);
            match self.send_and_record(&member, &phone, &text, None, true).await {
                Ok(_) => summary.successful += 1,
                Err(_) => summary.failed += 1,
            }
        }

        info!(
            date = %summary.date,
            matched = summary.matched,
            successful = summary.successful,
            failed = summary.failed,
            "Birthday run completed"
        );
        Ok(summary)
    }
}

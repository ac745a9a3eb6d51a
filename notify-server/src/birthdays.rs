//! Daily birthday scheduler
//!
//! Sleeps until `BIRTHDAY_TIME` in the configured timezone, greets the day's
//! birthdays, then recomputes the next run.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;

const FALLBACK_SLEEP: Duration = Duration::from_secs(60);

/// Registered as `TaskKind::Periodic` in `start_background_tasks()`.
pub struct BirthdayScheduler {
    state: ServerState,
    shutdown: CancellationToken,
}

impl BirthdayScheduler {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        let run_at = self.state.config.birthday_time;
        let tz = self.state.config.timezone;
        tracing::info!(time = %run_at.format("%H:%M"), timezone = %tz, "Birthday scheduler started");

        loop {
            let sleep_duration = duration_until_next_run(Utc::now(), run_at, tz);
            tracing::info!(
                "Next birthday run in {} minutes",
                sleep_duration.as_secs() / 60
            );

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    self.run_once(today_in(Utc::now(), tz)).await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Birthday scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn run_once(&self, today: NaiveDate) {
        match self.state.engine.dispatch_birthdays(today).await {
            Ok(summary) if summary.matched == 0 => {
                tracing::debug!(date = %summary.date, "No birthdays today");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Birthday run failed"),
        }
    }
}

/// Calendar date of `now` in `tz`
pub fn today_in(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Time from `now` to the next `run_at` wall-clock time in `tz`
pub fn duration_until_next_run(now: DateTime<Utc>, run_at: NaiveTime, tz: Tz) -> Duration {
    let local_now = now.with_timezone(&tz);
    let today = local_now.date_naive();

    let target_date = if local_now.time() >= run_at {
        today + chrono::Duration::days(1)
    } else {
        today
    };

    let Some(target) = target_date
        .and_time(run_at)
        .and_local_timezone(tz)
        .earliest()
        .or_else(|| {
            // Skipped by a DST jump
            (target_date.and_time(run_at) + chrono::Duration::hours(1))
                .and_local_timezone(tz)
                .earliest()
        })
    else {
        tracing::error!("Cannot resolve local run time, retrying shortly");
        return FALLBACK_SLEEP;
    };

    target
        .signed_duration_since(local_now)
        .to_std()
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or(FALLBACK_SLEEP)
}

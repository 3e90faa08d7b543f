use crate::application::batch::PayrollBatchRunner;
use crate::domain::attendance::Period;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{error, info};

/// Hour of day (UTC) the monthly run fires on the 1st.
const RUN_HOUR: u32 = 2;

/// Time-based trigger for the batch runner.
///
/// Fires once per calendar month, on the 1st at 02:00 UTC, targeting the
/// month that just ended. A manual run for the same period may race this
/// trigger; the runner's existence check makes the second arrival skip every
/// employee instead of duplicating records.
pub struct MonthlyScheduler {
    runner: PayrollBatchRunner,
}

impl MonthlyScheduler {
    pub fn new(runner: PayrollBatchRunner) -> Self {
        Self { runner }
    }

    pub fn status(&self) -> &'static str {
        "Automated payroll scheduler is ACTIVE. Next monthly run: 1st day of the month at 02:00 UTC"
    }

    /// First upcoming "1st of the month at 02:00 UTC" strictly after `now`.
    pub fn next_run_after(now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let this_month = run_instant(today.year(), today.month());
        if now < this_month {
            this_month
        } else if today.month() == 12 {
            run_instant(today.year() + 1, 1)
        } else {
            run_instant(today.year(), today.month() + 1)
        }
    }

    /// Sleeps until the next monthly boundary, runs the batch for the
    /// previous month, logs the summary, repeats. Run failures are logged
    /// and left for the next cycle (or a manual rerun); the loop never
    /// retries on its own.
    pub async fn run(&self) {
        info!("{}", self.status());
        loop {
            let now = Utc::now();
            let next = Self::next_run_after(now);
            let wait = (next - now).to_std().unwrap_or(std::time::Duration::ZERO);
            info!(next_run = %next, "sleeping until next monthly payroll run");
            tokio::time::sleep(wait).await;

            let period = Period::previous_month(Utc::now().date_naive());
            info!(%period, "monthly payroll run triggered");
            match self.runner.run_batch(period).await {
                Ok(summary) => info!(
                    processed = summary.processed,
                    skipped_existing = summary.skipped_existing,
                    errors = summary.errors,
                    "monthly payroll run finished"
                ),
                Err(e) => error!(error = %e, %period, "monthly payroll run failed"),
            }
        }
    }
}

fn run_instant(year: i32, month: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("the 1st exists in every month")
        .and_hms_opt(RUN_HOUR, 0, 0)
        .expect("02:00:00 is a valid time")
        .and_utc()
}

use crate::error::{PayrollError, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One payroll cycle, identified by calendar year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(PayrollError::Calculation(format!(
                "invalid month {month}, expected 1-12"
            )))
        }
    }

    /// The period of the calendar month immediately before `today`.
    pub fn previous_month(today: NaiveDate) -> Self {
        if today.month() == 1 {
            Self {
                year: today.year() - 1,
                month: 12,
            }
        } else {
            Self {
                year: today.year(),
                month: today.month() - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// One employee's attendance fact for one day.
///
/// Immutable once recorded; created by ingestion, owned by the attendance
/// store. Hour quantities use `Decimal` so downstream pay amounts stay exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: u64,
    pub employee_name: String,
    pub date: NaiveDate,
    pub present: bool,
    #[serde(default)]
    pub hours_worked: Decimal,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub overtime_hours: Decimal,
}

/// Metrics aggregated from one employee's attendance for one period.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceTotals {
    pub working_days: u32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub late_count: u32,
}

impl AttendanceTotals {
    /// Single scan over the attendance slice. Hours only count on present
    /// days; overtime only accumulates when positive.
    pub fn aggregate(attendance: &[AttendanceRecord]) -> Self {
        let mut totals = Self::default();
        for record in attendance {
            if record.present {
                totals.working_days += 1;
                totals.total_hours += record.hours_worked;
            }
            if record.late {
                totals.late_count += 1;
            }
            if record.overtime_hours > Decimal::ZERO {
                totals.overtime_hours += record.overtime_hours;
            }
        }
        totals
    }
}

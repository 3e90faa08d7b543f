use crate::domain::attendance::{AttendanceTotals, Period};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount, rounded to 2 decimal places at construction.
///
/// Wrapper around `rust_decimal::Decimal` so pay components stay exact and
/// render without trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value.round_dp(2))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Pay earned before statutory deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Earnings {
    pub basic: Money,
    pub overtime: Money,
    pub late_penalty: Money,
}

impl Earnings {
    /// Gross pay: base plus overtime, with the late penalty already taken
    /// out. The penalty reduces the amount the deduction percentages apply to.
    pub fn gross(&self) -> Money {
        self.basic + self.overtime - self.late_penalty
    }
}

/// Statutory deductions computed on gross pay. The late penalty is not a
/// deduction; it is already subtracted from gross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deductions {
    pub tax: Money,
    pub pf: Money,
    pub esi: Money,
}

impl Deductions {
    pub fn total(&self) -> Money {
        self.tax + self.pf + self.esi
    }
}

/// Where a salary record sits in the payment lifecycle. Ordered: a record
/// only ever moves to a later state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Processed,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processed => "PROCESSED",
            PaymentStatus::Paid => "PAID",
        };
        f.write_str(s)
    }
}

/// One employee's computed salary for one period.
///
/// Derived amounts (gross, total deductions, net) are computed once in
/// [`SalaryRecord::new`]; after that the record only changes through
/// [`SalaryRecord::advance_status`]. The ledger assigns `id` on first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub id: Option<u64>,
    pub employee_id: u64,
    pub employee_name: String,
    /// Only populated for manually entered records; the batch engine has no
    /// source for it.
    pub employee_code: Option<String>,
    pub period: Period,
    pub basic_salary: Money,
    pub overtime_pay: Money,
    pub gross_salary: Money,
    pub tax_deduction: Money,
    pub pf_deduction: Money,
    pub esi_deduction: Money,
    pub late_penalty: Money,
    pub total_deductions: Money,
    pub net_salary: Money,
    pub working_days: u32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub late_count: u32,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub processed_date: NaiveDate,
}

impl SalaryRecord {
    pub fn new(
        employee_id: u64,
        employee_name: String,
        period: Period,
        earnings: Earnings,
        deductions: Deductions,
        totals: AttendanceTotals,
    ) -> Self {
        let gross_salary = earnings.gross();
        let total_deductions = deductions.total();
        let now = Utc::now();
        Self {
            id: None,
            employee_id,
            employee_name,
            employee_code: None,
            period,
            basic_salary: earnings.basic,
            overtime_pay: earnings.overtime,
            gross_salary,
            tax_deduction: deductions.tax,
            pf_deduction: deductions.pf,
            esi_deduction: deductions.esi,
            late_penalty: earnings.late_penalty,
            total_deductions,
            net_salary: gross_salary - total_deductions,
            working_days: totals.working_days,
            total_hours: totals.total_hours,
            overtime_hours: totals.overtime_hours,
            late_count: totals.late_count,
            status: PaymentStatus::Processed,
            created_at: now,
            processed_date: now.date_naive(),
        }
    }

    /// Moves the record to `next` if that is a strictly later state.
    /// Returns false for a backward or same-state move, leaving the record
    /// untouched.
    pub fn advance_status(&mut self, next: PaymentStatus) -> bool {
        if next > self.status {
            self.status = next;
            true
        } else {
            false
        }
    }
}

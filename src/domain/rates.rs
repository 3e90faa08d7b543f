use crate::domain::salary::{Deductions, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rate configuration injected into the calculator.
///
/// `Default` carries the production values; tests override individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRates {
    pub hourly_rate: Decimal,
    pub overtime_multiplier: Decimal,
    pub late_penalty_amount: Decimal,
    /// Income tax, as a fraction of gross.
    pub tax_rate: Decimal,
    /// Provident fund, as a fraction of gross.
    pub pf_rate: Decimal,
    /// Health insurance, as a fraction of gross.
    pub esi_rate: Decimal,
    pub standard_working_days: u32,
    pub standard_hours_per_day: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            hourly_rate: dec!(50.0),
            overtime_multiplier: dec!(1.5),
            late_penalty_amount: dec!(25.0),
            tax_rate: dec!(0.10),
            pf_rate: dec!(0.12),
            esi_rate: dec!(0.0175),
            standard_working_days: 22,
            standard_hours_per_day: dec!(8.0),
        }
    }
}

impl PayrollRates {
    /// Hours a full month at standard attendance works out to; base pay is
    /// capped here so overtime hours are never double-counted.
    pub fn standard_monthly_hours(&self) -> Decimal {
        Decimal::from(self.standard_working_days) * self.standard_hours_per_day
    }

    pub fn deductions_on(&self, gross: Money) -> Deductions {
        Deductions {
            tax: Money::new(gross.value() * self.tax_rate),
            pf: Money::new(gross.value() * self.pf_rate),
            esi: Money::new(gross.value() * self.esi_rate),
        }
    }
}

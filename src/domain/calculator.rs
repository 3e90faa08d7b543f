use crate::domain::attendance::{AttendanceRecord, AttendanceTotals, Period};
use crate::domain::rates::PayrollRates;
use crate::domain::salary::{Earnings, Money, SalaryRecord};
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Turns one employee's attendance for one period into a salary record.
///
/// Pure aside from the injected [`PayrollRates`] and the creation timestamps
/// stamped on the output: the same attendance slice always produces the same
/// pay amounts.
pub struct PayrollCalculator {
    rates: PayrollRates,
}

/// Attendance metrics plus estimated gross pay, without building or
/// persisting a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollPreview {
    pub employee_id: u64,
    pub period: Period,
    pub working_days: u32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub late_count: u32,
    pub estimated_gross: Money,
}

impl PayrollCalculator {
    pub fn new(rates: PayrollRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }

    pub fn calculate(
        &self,
        employee_id: u64,
        period: Period,
        attendance: &[AttendanceRecord],
    ) -> Result<SalaryRecord> {
        let totals = self.checked_totals(employee_id, period, attendance)?;
        let earnings = self.earnings(&totals);
        let deductions = self.rates.deductions_on(earnings.gross());
        let record = SalaryRecord::new(
            employee_id,
            employee_name(employee_id, attendance),
            period,
            earnings,
            deductions,
            totals,
        );
        info!(
            employee_id,
            %period,
            gross = %record.gross_salary,
            net = %record.net_salary,
            working_days = record.working_days,
            "payroll calculated"
        );
        Ok(record)
    }

    pub fn preview(
        &self,
        employee_id: u64,
        period: Period,
        attendance: &[AttendanceRecord],
    ) -> Result<PayrollPreview> {
        let totals = self.checked_totals(employee_id, period, attendance)?;
        let earnings = self.earnings(&totals);
        Ok(PayrollPreview {
            employee_id,
            period,
            working_days: totals.working_days,
            total_hours: totals.total_hours,
            overtime_hours: totals.overtime_hours,
            late_count: totals.late_count,
            estimated_gross: earnings.gross(),
        })
    }

    fn checked_totals(
        &self,
        employee_id: u64,
        period: Period,
        attendance: &[AttendanceRecord],
    ) -> Result<AttendanceTotals> {
        if attendance.is_empty() {
            return Err(PayrollError::DataGap {
                employee_id,
                period,
            });
        }
        for record in attendance {
            if record.employee_id != employee_id {
                return Err(PayrollError::Calculation(format!(
                    "attendance for employee {} mixed into the run for employee {employee_id}",
                    record.employee_id
                )));
            }
            if !period.contains(record.date) {
                return Err(PayrollError::Calculation(format!(
                    "attendance dated {} is outside {period}",
                    record.date
                )));
            }
        }
        Ok(AttendanceTotals::aggregate(attendance))
    }

    fn earnings(&self, totals: &AttendanceTotals) -> Earnings {
        // Base pay is capped at the standard monthly hours; anything beyond
        // that is compensated through the overtime lane only.
        let payable_hours = totals.total_hours.min(self.rates.standard_monthly_hours());
        Earnings {
            basic: Money::new(payable_hours * self.rates.hourly_rate),
            overtime: Money::new(
                totals.overtime_hours * self.rates.hourly_rate * self.rates.overtime_multiplier,
            ),
            late_penalty: Money::new(
                Decimal::from(totals.late_count) * self.rates.late_penalty_amount,
            ),
        }
    }
}

fn employee_name(employee_id: u64, attendance: &[AttendanceRecord]) -> String {
    attendance
        .first()
        .map(|r| r.employee_name.clone())
        .unwrap_or_else(|| format!("Employee {employee_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn workday(employee_id: u64, day: u32, hours: Decimal) -> AttendanceRecord {
        AttendanceRecord {
            employee_id,
            employee_name: "Alice Smith".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            present: true,
            hours_worked: hours,
            late: false,
            overtime_hours: dec!(0),
        }
    }

    fn period() -> Period {
        Period {
            year: 2026,
            month: 1,
        }
    }

    fn calculator() -> PayrollCalculator {
        PayrollCalculator::new(PayrollRates::default())
    }

    #[test]
    fn test_standard_month_at_default_rates() {
        // 20 present days of 8h, no lates, no overtime.
        let attendance: Vec<_> = (1..=20).map(|d| workday(1, d, dec!(8.0))).collect();

        let record = calculator().calculate(1, period(), &attendance).unwrap();
        assert_eq!(record.basic_salary, Money::new(dec!(8000)));
        assert_eq!(record.overtime_pay, Money::ZERO);
        assert_eq!(record.late_penalty, Money::ZERO);
        assert_eq!(record.gross_salary, Money::new(dec!(8000)));
        assert_eq!(record.tax_deduction, Money::new(dec!(800)));
        assert_eq!(record.pf_deduction, Money::new(dec!(960)));
        assert_eq!(record.esi_deduction, Money::new(dec!(140)));
        assert_eq!(record.total_deductions, Money::new(dec!(1900)));
        assert_eq!(record.net_salary, Money::new(dec!(6100)));
        assert_eq!(record.working_days, 20);
        assert_eq!(record.total_hours, dec!(160.0));
        assert_eq!(record.employee_name, "Alice Smith");
    }

    #[test]
    fn test_base_pay_capped_at_standard_hours() {
        // 25 days of 8h = 200h, over the 176h standard.
        let attendance: Vec<_> = (1..=25).map(|d| workday(1, d, dec!(8.0))).collect();

        let record = calculator().calculate(1, period(), &attendance).unwrap();
        assert_eq!(record.basic_salary, Money::new(dec!(176.0) * dec!(50.0)));
        assert_eq!(record.total_hours, dec!(200.0));
    }

    #[test]
    fn test_overtime_paid_at_multiplier_not_in_base() {
        let mut attendance: Vec<_> = (1..=20).map(|d| workday(1, d, dec!(8.0))).collect();
        attendance[0].overtime_hours = dec!(2.0);

        let record = calculator().calculate(1, period(), &attendance).unwrap();
        assert_eq!(record.basic_salary, Money::new(dec!(8000)));
        assert_eq!(record.overtime_pay, Money::new(dec!(2.0) * dec!(50.0) * dec!(1.5)));
        assert_eq!(record.overtime_hours, dec!(2.0));
    }

    #[test]
    fn test_late_penalty_reduces_the_deduction_base() {
        let mut attendance: Vec<_> = (1..=20).map(|d| workday(1, d, dec!(8.0))).collect();
        attendance[0].late = true;
        attendance[1].late = true;

        let record = calculator().calculate(1, period(), &attendance).unwrap();
        assert_eq!(record.late_penalty, Money::new(dec!(50)));
        assert_eq!(record.gross_salary, Money::new(dec!(7950)));
        // Deductions apply to the penalty-reduced gross, and the penalty
        // itself is not part of total deductions.
        assert_eq!(record.tax_deduction, Money::new(dec!(795)));
        assert_eq!(
            record.total_deductions,
            record.tax_deduction + record.pf_deduction + record.esi_deduction
        );
    }

    #[test]
    fn test_empty_attendance_is_a_data_gap() {
        let err = calculator().calculate(1, period(), &[]).unwrap_err();
        assert!(matches!(err, PayrollError::DataGap { employee_id: 1, .. }));
    }

    #[test]
    fn test_mixed_employee_rejected() {
        let mut attendance = vec![workday(1, 5, dec!(8.0))];
        attendance.push(workday(2, 6, dec!(8.0)));

        let err = calculator().calculate(1, period(), &attendance).unwrap_err();
        assert!(matches!(err, PayrollError::Calculation(_)));
    }

    #[test]
    fn test_date_outside_period_rejected() {
        let mut record = workday(1, 5, dec!(8.0));
        record.date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();

        let err = calculator().calculate(1, period(), &[record]).unwrap_err();
        assert!(matches!(err, PayrollError::Calculation(_)));
    }

    #[test]
    fn test_preview_estimates_gross_without_deductions() {
        let mut attendance: Vec<_> = (1..=20).map(|d| workday(1, d, dec!(8.0))).collect();
        attendance[0].late = true;
        attendance[0].overtime_hours = dec!(2.0);

        let preview = calculator().preview(1, period(), &attendance).unwrap();
        assert_eq!(preview.working_days, 20);
        assert_eq!(preview.late_count, 1);
        assert_eq!(preview.overtime_hours, dec!(2.0));
        // 8000 + 150 overtime - 25 penalty
        assert_eq!(preview.estimated_gross, Money::new(dec!(8125)));
    }

    #[test]
    fn test_same_attendance_always_yields_same_amounts() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let attendance: Vec<_> = (1..=28)
            .map(|day| AttendanceRecord {
                employee_id: 9,
                employee_name: "Rahim Uddin".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
                present: rng.gen_bool(0.9),
                hours_worked: Decimal::new(rng.gen_range(0..=120), 1),
                late: rng.gen_bool(0.2),
                overtime_hours: Decimal::new(rng.gen_range(0..=40), 1),
            })
            .collect();

        let calc = calculator();
        let first = calc.calculate(9, period(), &attendance).unwrap();
        let second = calc.calculate(9, period(), &attendance).unwrap();

        assert_eq!(first.basic_salary, second.basic_salary);
        assert_eq!(first.overtime_pay, second.overtime_pay);
        assert_eq!(first.late_penalty, second.late_penalty);
        assert_eq!(first.gross_salary, second.gross_salary);
        assert_eq!(first.tax_deduction, second.tax_deduction);
        assert_eq!(first.pf_deduction, second.pf_deduction);
        assert_eq!(first.esi_deduction, second.esi_deduction);
        assert_eq!(first.total_deductions, second.total_deductions);
        assert_eq!(first.net_salary, second.net_salary);
    }
}

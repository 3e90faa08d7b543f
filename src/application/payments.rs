use crate::domain::ports::PayrollLedgerBox;
use crate::domain::salary::PaymentStatus;
use crate::error::Result;
use tracing::info;

/// Advances persisted salary records through the payment lifecycle.
///
/// Transition legality lives on the record itself
/// ([`crate::domain::salary::SalaryRecord::advance_status`]); this processor
/// only loads, advances and saves. Already-paid records are reported through
/// the return value, not as errors.
pub struct PaymentProcessor {
    ledger: PayrollLedgerBox,
}

impl PaymentProcessor {
    pub fn new(ledger: PayrollLedgerBox) -> Self {
        Self { ledger }
    }

    /// Marks one record as paid. Returns false when the record is already
    /// paid or the id is unknown.
    pub async fn pay_one(&self, id: u64) -> Result<bool> {
        let Some(mut record) = self.ledger.find_by_id(id).await? else {
            return Ok(false);
        };
        if !record.advance_status(PaymentStatus::Paid) {
            return Ok(false);
        }
        self.ledger.save(record).await?;
        info!(id, "salary record marked as paid");
        Ok(true)
    }

    /// Marks every record not yet paid as paid and returns how many were
    /// transitioned. A second call right after a full run returns 0.
    pub async fn pay_all_pending(&self) -> Result<usize> {
        let mut paid = 0;
        for mut record in self.ledger.all_ordered_by_creation().await? {
            if record.advance_status(PaymentStatus::Paid) {
                self.ledger.save(record).await?;
                paid += 1;
            }
        }
        info!(paid, "bulk payment run completed");
        Ok(paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance::{AttendanceTotals, Period};
    use crate::domain::ports::PayrollLedger;
    use crate::domain::salary::{Deductions, Earnings, Money, SalaryRecord};
    use crate::infrastructure::in_memory::InMemoryPayrollLedger;
    use rust_decimal_macros::dec;

    fn record_for(employee_id: u64) -> SalaryRecord {
        SalaryRecord::new(
            employee_id,
            format!("Employee {employee_id}"),
            Period {
                year: 2026,
                month: 1,
            },
            Earnings {
                basic: Money::new(dec!(8000)),
                overtime: Money::ZERO,
                late_penalty: Money::ZERO,
            },
            Deductions {
                tax: Money::new(dec!(800)),
                pf: Money::new(dec!(960)),
                esi: Money::new(dec!(140)),
            },
            AttendanceTotals {
                working_days: 20,
                total_hours: dec!(160),
                overtime_hours: dec!(0),
                late_count: 0,
            },
        )
    }

    async fn ledger_with(records: Vec<SalaryRecord>) -> InMemoryPayrollLedger {
        let ledger = InMemoryPayrollLedger::new();
        for record in records {
            ledger.save(record).await.unwrap();
        }
        ledger
    }

    #[tokio::test]
    async fn test_pay_one_transitions_then_noops() {
        let ledger = ledger_with(vec![record_for(1)]).await;
        let processor = PaymentProcessor::new(Box::new(ledger.clone()));

        assert!(processor.pay_one(1).await.unwrap());
        assert_eq!(
            ledger.find_by_id(1).await.unwrap().unwrap().status,
            PaymentStatus::Paid
        );

        // Already paid: no-op, not an error.
        assert!(!processor.pay_one(1).await.unwrap());
        assert_eq!(
            ledger.find_by_id(1).await.unwrap().unwrap().status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_pay_one_unknown_id_returns_false() {
        let processor = PaymentProcessor::new(Box::new(InMemoryPayrollLedger::new()));
        assert!(!processor.pay_one(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_pay_all_covers_pending_and_processed() {
        let mut pending = record_for(1);
        pending.status = PaymentStatus::Pending;
        let processed = record_for(2);
        let mut already_paid = record_for(3);
        already_paid.status = PaymentStatus::Paid;

        let ledger = ledger_with(vec![pending, processed, already_paid]).await;
        let processor = PaymentProcessor::new(Box::new(ledger.clone()));

        assert_eq!(processor.pay_all_pending().await.unwrap(), 2);
        for record in ledger.all_ordered_by_creation().await.unwrap() {
            assert_eq!(record.status, PaymentStatus::Paid);
        }
    }

    #[tokio::test]
    async fn test_pay_all_twice_returns_count_then_zero() {
        let ledger = ledger_with(vec![record_for(1), record_for(2)]).await;
        let processor = PaymentProcessor::new(Box::new(ledger));

        assert_eq!(processor.pay_all_pending().await.unwrap(), 2);
        assert_eq!(processor.pay_all_pending().await.unwrap(), 0);
    }
}

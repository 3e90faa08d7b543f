use crate::domain::attendance::Period;
use crate::domain::calculator::PayrollCalculator;
use crate::domain::ports::{AttendanceStoreBox, PayrollLedgerBox};
use crate::domain::salary::SalaryRecord;
use crate::error::{PayrollError, Result};
use tracing::{error, info, warn};

/// Aggregated counts for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped_existing: usize,
    pub errors: usize,
}

/// How one employee's processing ended inside a batch run.
#[derive(Debug)]
pub enum EmployeeOutcome {
    Processed(SalaryRecord),
    AlreadyProcessed,
    NoAttendance,
    Failed(PayrollError),
}

/// Drives one calculation pass over all eligible employees for a period.
///
/// The runner owns the storage backends and awaits every storage operation,
/// so each employee's read/compute/write completes before the next starts.
/// Employee failures are isolated: they are counted and logged, never allowed
/// to abort the rest of the run. Re-running the same period is safe — the
/// ledger existence check skips employees that already have a record.
pub struct PayrollBatchRunner {
    attendance: AttendanceStoreBox,
    ledger: PayrollLedgerBox,
    calculator: PayrollCalculator,
}

impl PayrollBatchRunner {
    pub fn new(
        attendance: AttendanceStoreBox,
        ledger: PayrollLedgerBox,
        calculator: PayrollCalculator,
    ) -> Self {
        Self {
            attendance,
            ledger,
            calculator,
        }
    }

    pub async fn run_batch(&self, period: Period) -> Result<BatchSummary> {
        info!(%period, "starting payroll batch run");

        let employee_ids = self
            .attendance
            .distinct_employee_ids(period)
            .await
            .map_err(|e| PayrollError::FatalSetup(Box::new(e)))?;

        if employee_ids.is_empty() {
            warn!(%period, "no employees with attendance, nothing to process");
            return Ok(BatchSummary::default());
        }

        let mut summary = BatchSummary::default();
        for employee_id in employee_ids {
            match self.process_employee(employee_id, period).await {
                EmployeeOutcome::Processed(record) => {
                    info!(employee_id, %period, net = %record.net_salary, "payroll processed");
                    summary.processed += 1;
                }
                EmployeeOutcome::AlreadyProcessed => {
                    info!(employee_id, %period, "payroll already exists, skipping");
                    summary.skipped_existing += 1;
                }
                EmployeeOutcome::NoAttendance => {
                    warn!(employee_id, %period, "no attendance data, skipping");
                }
                EmployeeOutcome::Failed(e) => {
                    error!(employee_id, %period, error = %e, "payroll processing failed");
                    summary.errors += 1;
                }
            }
        }

        info!(
            %period,
            processed = summary.processed,
            skipped_existing = summary.skipped_existing,
            errors = summary.errors,
            "payroll batch run completed"
        );
        Ok(summary)
    }

    async fn process_employee(&self, employee_id: u64, period: Period) -> EmployeeOutcome {
        let exists = match self
            .ledger
            .exists_for_employee_period(employee_id, period)
            .await
        {
            Ok(exists) => exists,
            Err(e) => return EmployeeOutcome::Failed(e),
        };
        if exists {
            return EmployeeOutcome::AlreadyProcessed;
        }

        let attendance = match self
            .attendance
            .find_by_employee_and_period(employee_id, period)
            .await
        {
            Ok(records) => records,
            Err(e) => return EmployeeOutcome::Failed(e),
        };
        if attendance.is_empty() {
            return EmployeeOutcome::NoAttendance;
        }

        let record = match self.calculator.calculate(employee_id, period, &attendance) {
            Ok(record) => record,
            Err(e) => return EmployeeOutcome::Failed(e),
        };

        match self.ledger.save(record).await {
            Ok(saved) => EmployeeOutcome::Processed(saved),
            Err(e) => EmployeeOutcome::Failed(e),
        }
    }

    /// Consumes the runner and returns every persisted salary record in
    /// creation order.
    pub async fn into_results(self) -> Result<Vec<SalaryRecord>> {
        self.ledger.all_ordered_by_creation().await
    }
}

use crate::domain::attendance::{AttendanceRecord, Period};
use crate::domain::salary::SalaryRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Storage of per-employee daily attendance facts.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn store(&self, record: AttendanceRecord) -> Result<()>;
    async fn find_by_employee_and_period(
        &self,
        employee_id: u64,
        period: Period,
    ) -> Result<Vec<AttendanceRecord>>;
    /// Employees with at least one attendance entry in the period, sorted.
    async fn distinct_employee_ids(&self, period: Period) -> Result<Vec<u64>>;
}

/// Storage of computed salary records.
#[async_trait]
pub trait PayrollLedger: Send + Sync {
    /// Persists the record, assigning an id on first save.
    async fn save(&self, record: SalaryRecord) -> Result<SalaryRecord>;
    async fn find_by_id(&self, id: u64) -> Result<Option<SalaryRecord>>;
    async fn exists_for_employee_period(&self, employee_id: u64, period: Period) -> Result<bool>;
    async fn all_ordered_by_creation(&self) -> Result<Vec<SalaryRecord>>;
}

pub type AttendanceStoreBox = Box<dyn AttendanceStore>;
pub type PayrollLedgerBox = Box<dyn PayrollLedger>;

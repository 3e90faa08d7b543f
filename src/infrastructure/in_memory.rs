use crate::domain::attendance::{AttendanceRecord, Period};
use crate::domain::ports::{AttendanceStore, PayrollLedger};
use crate::domain::salary::SalaryRecord;
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for attendance records.
///
/// Uses `Arc<RwLock<Vec<AttendanceRecord>>>` to allow shared concurrent
/// access; cloned handles share the same data. Ideal for tests and one-shot
/// CLI runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryAttendanceStore {
    records: Arc<RwLock<Vec<AttendanceRecord>>>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn store(&self, record: AttendanceRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }

    async fn find_by_employee_and_period(
        &self,
        employee_id: u64,
        period: Period,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.employee_id == employee_id && period.contains(r.date))
            .cloned()
            .collect())
    }

    async fn distinct_employee_ids(&self, period: Period) -> Result<Vec<u64>> {
        let records = self.records.read().await;
        let ids: BTreeSet<u64> = records
            .iter()
            .filter(|r| period.contains(r.date))
            .map(|r| r.employee_id)
            .collect();
        Ok(ids.into_iter().collect())
    }
}

#[derive(Default)]
struct LedgerInner {
    next_id: u64,
    records: Vec<SalaryRecord>,
}

/// A thread-safe in-memory salary ledger.
///
/// Assigns monotonically increasing ids on first save and keeps records in
/// creation order. Cloned handles share the same data.
#[derive(Default, Clone)]
pub struct InMemoryPayrollLedger {
    inner: Arc<RwLock<LedgerInner>>,
}

impl InMemoryPayrollLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayrollLedger for InMemoryPayrollLedger {
    async fn save(&self, mut record: SalaryRecord) -> Result<SalaryRecord> {
        let mut inner = self.inner.write().await;
        match record.id {
            Some(id) => {
                let slot = inner
                    .records
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or_else(|| {
                        PayrollError::Persistence(format!("salary record {id} does not exist"))
                    })?;
                *slot = record.clone();
            }
            None => {
                inner.next_id += 1;
                record.id = Some(inner.next_id);
                inner.records.push(record.clone());
            }
        }
        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<SalaryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn exists_for_employee_period(&self, employee_id: u64, period: Period) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .any(|r| r.employee_id == employee_id && r.period == period))
    }

    async fn all_ordered_by_creation(&self) -> Result<Vec<SalaryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.clone())
    }
}

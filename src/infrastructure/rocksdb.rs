use crate::domain::attendance::{AttendanceRecord, Period};
use crate::domain::ports::{AttendanceStore, PayrollLedger};
use crate::domain::salary::SalaryRecord;
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Column Family for attendance records, keyed by (employee id, date).
pub const CF_ATTENDANCE: &str = "attendance";
/// Column Family for salary records, keyed by big-endian id so iteration
/// order is creation order.
pub const CF_SALARIES: &str = "salaries";

/// A persistent store implementation using RocksDB.
///
/// Implements both storage ports over separate Column Families with
/// JSON-encoded values. `Clone` shares the underlying `Arc<DB>`, so one
/// opened database can back the attendance store and the ledger at once.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_attendance = ColumnFamilyDescriptor::new(CF_ATTENDANCE, Options::default());
        let cf_salaries = ColumnFamilyDescriptor::new(CF_SALARIES, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_attendance, cf_salaries])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PayrollError::Persistence(format!("column family {name} not found")))
    }
}

fn attendance_key(record: &AttendanceRecord) -> Vec<u8> {
    let mut key = record.employee_id.to_be_bytes().to_vec();
    key.extend_from_slice(record.date.to_string().as_bytes());
    key
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| PayrollError::Persistence(format!("encoding failed: {e}")))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| PayrollError::Persistence(format!("decoding failed: {e}")))
}

#[async_trait]
impl AttendanceStore for RocksDBStore {
    async fn store(&self, record: AttendanceRecord) -> Result<()> {
        let cf = self.cf(CF_ATTENDANCE)?;
        self.db
            .put_cf(&cf, attendance_key(&record), encode(&record)?)?;
        Ok(())
    }

    async fn find_by_employee_and_period(
        &self,
        employee_id: u64,
        period: Period,
    ) -> Result<Vec<AttendanceRecord>> {
        let cf = self.cf(CF_ATTENDANCE)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record: AttendanceRecord = decode(&value)?;
            if record.employee_id == employee_id && period.contains(record.date) {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn distinct_employee_ids(&self, period: Period) -> Result<Vec<u64>> {
        let cf = self.cf(CF_ATTENDANCE)?;
        let mut ids = BTreeSet::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record: AttendanceRecord = decode(&value)?;
            if period.contains(record.date) {
                ids.insert(record.employee_id);
            }
        }
        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl PayrollLedger for RocksDBStore {
    async fn save(&self, mut record: SalaryRecord) -> Result<SalaryRecord> {
        let cf = self.cf(CF_SALARIES)?;
        let id = match record.id {
            Some(id) => id,
            None => {
                // Keys are big-endian, so the last key holds the highest id.
                let next = match self.db.iterator_cf(&cf, IteratorMode::End).next() {
                    Some(item) => {
                        let (key, _value) = item?;
                        salary_id_from_key(&key)? + 1
                    }
                    None => 1,
                };
                record.id = Some(next);
                next
            }
        };
        self.db.put_cf(&cf, id.to_be_bytes(), encode(&record)?)?;
        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<SalaryRecord>> {
        let cf = self.cf(CF_SALARIES)?;
        match self.db.get_cf(&cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn exists_for_employee_period(&self, employee_id: u64, period: Period) -> Result<bool> {
        let cf = self.cf(CF_SALARIES)?;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record: SalaryRecord = decode(&value)?;
            if record.employee_id == employee_id && record.period == period {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn all_ordered_by_creation(&self) -> Result<Vec<SalaryRecord>> {
        let cf = self.cf(CF_SALARIES)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(decode(&value)?);
        }
        Ok(records)
    }
}

fn salary_id_from_key(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| PayrollError::Persistence("malformed salary key".to_string()))?;
    Ok(u64::from_be_bytes(bytes))
}

use crate::domain::attendance::Period;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("no attendance recorded for employee {employee_id} in {period}")]
    DataGap { employee_id: u64, period: Period },
    #[error("payroll calculation failed: {0}")]
    Calculation(String),
    #[error("persistence failed: {0}")]
    Persistence(String),
    #[error("batch setup failed: {0}")]
    FatalSetup(#[source] Box<PayrollError>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

pub type Result<T> = std::result::Result<T, PayrollError>;

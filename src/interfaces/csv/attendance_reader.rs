use crate::domain::attendance::AttendanceRecord;
use crate::error::{PayrollError, Result};
use std::io::Read;

/// Reads attendance records from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<AttendanceRecord>`. It handles whitespace trimming and flexible
/// record lengths automatically; omitted hour/late columns fall back to
/// zero/false.
pub struct AttendanceReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AttendanceReader<R> {
    /// Creates a new `AttendanceReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes attendance
    /// rows, so large files stream without loading everything into memory.
    pub fn records(self) -> impl Iterator<Item = Result<AttendanceRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayrollError::from))
    }
}

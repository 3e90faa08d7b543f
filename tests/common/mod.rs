use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const ATTENDANCE_HEADER: [&str; 7] = [
    "employee_id",
    "employee_name",
    "date",
    "present",
    "hours_worked",
    "late",
    "overtime_hours",
];

/// Writes a month of standard attendance: `days` present days of 8 hours in
/// January 2026, no lates, no overtime.
pub fn generate_attendance_csv(
    path: &Path,
    employee_id: u64,
    name: &str,
    days: usize,
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(ATTENDANCE_HEADER)?;
    for day in 1..=days {
        let id = employee_id.to_string();
        let date = format!("2026-01-{day:02}");
        wtr.write_record([id.as_str(), name, date.as_str(), "true", "8.0", "false", "0"])?;
    }

    wtr.flush()?;
    Ok(())
}

use crate::domain::salary::SalaryRecord;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 21] = [
    "id",
    "employee_id",
    "employee_name",
    "employee_code",
    "year",
    "month",
    "basic_salary",
    "overtime_pay",
    "gross_salary",
    "tax_deduction",
    "pf_deduction",
    "esi_deduction",
    "late_penalty",
    "total_deductions",
    "net_salary",
    "working_days",
    "total_hours",
    "overtime_hours",
    "late_count",
    "status",
    "processed_date",
];

/// Renders salary records as CSV to any `Write` target.
pub struct SalaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SalaryWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_records(&mut self, records: Vec<SalaryRecord>) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for record in records {
            self.writer.write_record(row(&record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn row(record: &SalaryRecord) -> Vec<String> {
    vec![
        record.id.map(|id| id.to_string()).unwrap_or_default(),
        record.employee_id.to_string(),
        record.employee_name.clone(),
        record.employee_code.clone().unwrap_or_default(),
        record.period.year.to_string(),
        record.period.month.to_string(),
        record.basic_salary.to_string(),
        record.overtime_pay.to_string(),
        record.gross_salary.to_string(),
        record.tax_deduction.to_string(),
        record.pf_deduction.to_string(),
        record.esi_deduction.to_string(),
        record.late_penalty.to_string(),
        record.total_deductions.to_string(),
        record.net_salary.to_string(),
        record.working_days.to_string(),
        record.total_hours.normalize().to_string(),
        record.overtime_hours.normalize().to_string(),
        record.late_count.to_string(),
        record.status.to_string(),
        record.processed_date.to_string(),
    ]
}

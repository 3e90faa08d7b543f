use chrono::Utc;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payrolld::application::batch::PayrollBatchRunner;
use payrolld::application::payments::PaymentProcessor;
use payrolld::application::scheduler::MonthlyScheduler;
use payrolld::domain::attendance::Period;
use payrolld::domain::calculator::PayrollCalculator;
use payrolld::domain::ports::{AttendanceStore, AttendanceStoreBox, PayrollLedgerBox};
use payrolld::domain::rates::PayrollRates;
use payrolld::infrastructure::in_memory::{InMemoryAttendanceStore, InMemoryPayrollLedger};
#[cfg(feature = "storage-rocksdb")]
use payrolld::infrastructure::rocksdb::RocksDBStore;
use payrolld::interfaces::csv::attendance_reader::AttendanceReader;
use payrolld::interfaces::csv::salary_writer::SalaryWriter;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest attendance from CSV and run a payroll batch for one period
    Run {
        /// Input attendance CSV file
        input: PathBuf,

        /// Target year; defaults to the previous calendar month
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// Target month (1-12); defaults to the previous calendar month
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
    /// Ingest attendance from CSV and start the monthly scheduler
    Schedule {
        /// Input attendance CSV file
        input: PathBuf,
    },
    /// Estimate one employee's gross pay without persisting anything
    Preview {
        /// Input attendance CSV file
        input: PathBuf,

        #[arg(long)]
        employee: u64,

        /// Target year; defaults to the previous calendar month
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// Target month (1-12); defaults to the previous calendar month
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
    /// Mark one salary record as paid
    Pay {
        /// Salary record id
        id: u64,
    },
    /// Mark every unpaid salary record as paid
    PayAll,
    /// Print the scheduler status line
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (attendance, ledger) = build_stores(&cli)?;

    match cli.command {
        Command::Run { input, year, month } => {
            let loaded = ingest_attendance(attendance.as_ref(), &input).await?;
            info!(records = loaded, path = %input.display(), "attendance ingested");

            let period = resolve_period(year, month).into_diagnostic()?;
            let runner = PayrollBatchRunner::new(
                attendance,
                ledger,
                PayrollCalculator::new(PayrollRates::default()),
            );
            runner.run_batch(period).await.into_diagnostic()?;

            let records = runner.into_results().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = SalaryWriter::new(stdout.lock());
            writer.write_records(records).into_diagnostic()?;
        }
        Command::Schedule { input } => {
            let loaded = ingest_attendance(attendance.as_ref(), &input).await?;
            info!(records = loaded, path = %input.display(), "attendance ingested");

            let runner = PayrollBatchRunner::new(
                attendance,
                ledger,
                PayrollCalculator::new(PayrollRates::default()),
            );
            let scheduler = MonthlyScheduler::new(runner);
            scheduler.run().await;
        }
        Command::Preview {
            input,
            employee,
            year,
            month,
        } => {
            ingest_attendance(attendance.as_ref(), &input).await?;

            let period = resolve_period(year, month).into_diagnostic()?;
            let records = attendance
                .find_by_employee_and_period(employee, period)
                .await
                .into_diagnostic()?;
            let calculator = PayrollCalculator::new(PayrollRates::default());
            let preview = calculator
                .preview(employee, period, &records)
                .into_diagnostic()?;
            println!(
                "employee {} for {}: {} working days, {} hours worked, {} overtime hours, {} late arrivals, estimated gross {}",
                preview.employee_id,
                preview.period,
                preview.working_days,
                preview.total_hours.normalize(),
                preview.overtime_hours.normalize(),
                preview.late_count,
                preview.estimated_gross,
            );
        }
        Command::Pay { id } => {
            let processor = PaymentProcessor::new(ledger);
            if processor.pay_one(id).await.into_diagnostic()? {
                println!("salary record {id} marked as paid");
            } else {
                println!("salary record {id} is already paid or does not exist");
            }
        }
        Command::PayAll => {
            let processor = PaymentProcessor::new(ledger);
            let paid = processor.pay_all_pending().await.into_diagnostic()?;
            println!("{paid} salary records marked as paid");
        }
        Command::Status => {
            let runner = PayrollBatchRunner::new(
                attendance,
                ledger,
                PayrollCalculator::new(PayrollRates::default()),
            );
            let scheduler = MonthlyScheduler::new(runner);
            println!("{}", scheduler.status());
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn build_stores(cli: &Cli) -> Result<(AttendanceStoreBox, PayrollLedgerBox)> {
    match &cli.db_path {
        Some(db_path) => {
            // One opened database backs both ports.
            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_stores(_cli: &Cli) -> Result<(AttendanceStoreBox, PayrollLedgerBox)> {
    Ok(in_memory_stores())
}

fn in_memory_stores() -> (AttendanceStoreBox, PayrollLedgerBox) {
    (
        Box::new(InMemoryAttendanceStore::new()),
        Box::new(InMemoryPayrollLedger::new()),
    )
}

async fn ingest_attendance(store: &dyn AttendanceStore, input: &Path) -> Result<usize> {
    let file = File::open(input).into_diagnostic()?;
    let reader = AttendanceReader::new(file);
    let mut loaded = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => {
                store.store(record).await.into_diagnostic()?;
                loaded += 1;
            }
            Err(e) => warn!(error = %e, "skipping malformed attendance row"),
        }
    }
    Ok(loaded)
}

fn resolve_period(year: Option<i32>, month: Option<u32>) -> payrolld::error::Result<Period> {
    match (year, month) {
        (Some(year), Some(month)) => Period::new(year, month),
        _ => Ok(Period::previous_month(Utc::now().date_naive())),
    }
}

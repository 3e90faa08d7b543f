pub mod attendance_reader;
pub mod salary_writer;

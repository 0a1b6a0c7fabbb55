//! File exports of report data

pub mod csv_exporter;

pub use csv_exporter::{EMPLOYEES_CSV_NAME, export_employees_csv};

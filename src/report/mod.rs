//! Timesheet reports and CSV export.

mod csv;
mod generator;

pub use csv::{
    CsvExport, EMPLOYEE_HEADERS, REPORT_HEADERS, employees_to_csv, export_filename, report_to_csv,
    to_csv,
};
pub use generator::{ReportQuery, ReportRow, TimesheetReport, UNKNOWN_EMPLOYEE, generate_report};

//! CSV rendering for reports and the employee directory.
//!
//! Every data cell is wrapped in double quotes with embedded quotes doubled.
//! Cells holding an ISO-8601 date-time are rewritten as `yyyy-MM-dd HH:mm`.
//! Lines are separated by a bare `\n`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::parse_timestamp;
use crate::models::Employee;

use super::generator::TimesheetReport;

/// Column labels of the timesheet report export.
pub const REPORT_HEADERS: [&str; 7] = [
    "Date",
    "Employee Name",
    "Employee ID",
    "Project",
    "Regular Hours",
    "Overtime Hours",
    "Total Hours",
];

/// Column labels of the employee directory export.
pub const EMPLOYEE_HEADERS: [&str; 5] = ["Name", "Email", "Employee ID", "Role", "Created At"];

/// A rendered CSV document and the name it downloads as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Download name, see [`export_filename`].
    pub filename: String,
    /// The CSV text.
    pub content: String,
}

/// Renders a header line followed by one line per row.
///
/// # Examples
///
/// ```
/// use timesheet_engine::report::to_csv;
///
/// let csv = to_csv(
///     &["Name", "Note"],
///     vec![vec!["Sam".to_string(), "said \"hi\"".to_string()]],
/// );
/// assert_eq!(csv, "Name,Note\n\"Sam\",\"said \"\"hi\"\"\"");
/// ```
pub fn to_csv<R, C>(headers: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut lines = vec![headers.join(",")];
    lines.extend(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|cell| format_cell(&cell))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

/// Renders a timesheet report with [`REPORT_HEADERS`].
pub fn report_to_csv(report: &TimesheetReport) -> String {
    to_csv(
        &REPORT_HEADERS,
        report.rows.iter().map(|row| {
            vec![
                row.date.to_string(),
                row.employee_name.clone(),
                row.employee_id.clone(),
                row.project.clone(),
                hours_cell(row.regular_hours),
                hours_cell(row.overtime_hours),
                hours_cell(row.total_hours),
            ]
        }),
    )
}

/// Renders the employee directory with [`EMPLOYEE_HEADERS`].
pub fn employees_to_csv(employees: &[Employee]) -> String {
    to_csv(
        &EMPLOYEE_HEADERS,
        employees.iter().map(|employee| {
            vec![
                employee.name.clone(),
                employee.email.clone(),
                employee.employee_id.clone(),
                employee.role.as_str().to_string(),
                employee.created_at.to_rfc3339(),
            ]
        }),
    )
}

/// Download name for an export taken on `date`: `{prefix}_{yyyy-MM-dd}.csv`.
///
/// # Examples
///
/// ```
/// use timesheet_engine::report::export_filename;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
/// assert_eq!(export_filename("timesheet_report", date), "timesheet_report_2023-06-01.csv");
/// ```
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

fn hours_cell(hours: Decimal) -> String {
    hours.normalize().to_string()
}

fn format_cell(value: &str) -> String {
    let value = if looks_like_iso_datetime(value) {
        match parse_timestamp(value) {
            Some(instant) => instant.format("%Y-%m-%d %H:%M").to_string(),
            None => value.to_string(),
        }
    } else {
        value.to_string()
    };
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Matches a `yyyy-MM-ddTHH:mm` prefix.
fn looks_like_iso_datetime(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 16 {
        return false;
    }
    bytes[..16].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}

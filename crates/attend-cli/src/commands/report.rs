//! Rendering of employees and attendance records for the console.

use std::fmt::Write;

use attend_core::{AttendanceRecord, Employee};

use super::util::TIMESTAMP_FORMAT;

const RULE: &str = "---------------------------------------";

/// Formats worked hours with two decimals, or "N/A" when absent.
pub fn format_worked_hours(hours: Option<f64>) -> String {
    hours.map_or_else(|| "N/A".to_string(), |h| format!("{h:.2} hrs"))
}

/// Format the employee list, one line per employee.
pub fn format_employees(employees: &[Employee]) -> String {
    let mut output = String::new();

    writeln!(output, "Employee List:").unwrap();
    if employees.is_empty() {
        writeln!(output, "No employees found.").unwrap();
        return output;
    }

    for employee in employees {
        writeln!(
            output,
            "ID: {}, Name: {}, Role: {}",
            employee.id,
            employee.full_name(),
            employee.role
        )
        .unwrap();
    }

    output
}

/// Format all attendance records in ledger order.
pub fn format_attendance(records: &[AttendanceRecord]) -> String {
    let mut output = String::new();

    writeln!(output, "Attendance Records:").unwrap();
    if records.is_empty() {
        writeln!(output, "No attendance records found.").unwrap();
        return output;
    }

    for record in records {
        writeln!(output, "Employee ID: {}", record.employee_id).unwrap();
        writeln!(
            output,
            "Check-In: {}",
            record.check_in_time.format(TIMESTAMP_FORMAT)
        )
        .unwrap();
        match record.check_out_time {
            Some(check_out) => {
                writeln!(output, "Check-Out: {}", check_out.format(TIMESTAMP_FORMAT)).unwrap();
            }
            None => writeln!(output, "Check-Out: Not yet checked out").unwrap(),
        }
        writeln!(
            output,
            "Working Hours: {}",
            format_worked_hours(record.worked_hours)
        )
        .unwrap();
        writeln!(output, "{RULE}").unwrap();
    }

    output
}

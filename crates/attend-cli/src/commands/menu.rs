//! Interactive attendance menu.
//!
//! Reads choices and values line by line, resolves them into typed values,
//! and hands them to the tracker. Invalid input re-prompts; end of input
//! ends the session as if "Exit" had been chosen.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use attend_core::{AttendanceError, AttendanceTracker, Clock, EmployeeId};
use chrono::NaiveDateTime;

use super::report::{format_attendance, format_employees};
use super::util::{TIMESTAMP_HINT, non_empty, parse_reporting_to, parse_timestamp};

const MENU: &str = "Menu:
1. Add Employee
2. List Employees
3. Check-In
4. Check-Out
5. View Attendance Records
6. Exit
Enter your choice:";

/// Input stream closed while a prompt was waiting.
#[derive(Debug, Clone, Copy)]
struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "end of input")
    }
}

impl std::error::Error for EndOfInput {}

/// Which way a check is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

impl Direction {
    const fn label(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::In => "Check-In",
            Self::Out => "Check-Out",
        }
    }
}

/// Runs the menu until "Exit" is chosen or input ends.
pub fn run<R, W, C>(input: R, output: W, tracker: &mut AttendanceTracker<C>) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Clock,
{
    let mut session = Session {
        input,
        output,
        tracker,
    };
    match session.main_loop() {
        Err(err) if err.is::<EndOfInput>() => {
            tracing::debug!("input closed, leaving menu");
            Ok(())
        }
        other => other,
    }
}

struct Session<'a, R, W, C> {
    input: R,
    output: W,
    tracker: &'a mut AttendanceTracker<C>,
}

impl<R: BufRead, W: Write, C: Clock> Session<'_, R, W, C> {
    fn main_loop(&mut self) -> Result<()> {
        loop {
            let choice = self.prompt(MENU)?;
            tracing::debug!(choice = choice.trim(), "menu selection");
            match choice.trim() {
                "1" => self.add_employees()?,
                "2" => {
                    let listing = format_employees(self.tracker.list_all_employees());
                    write!(self.output, "{listing}")?;
                }
                "3" => self.check_loop(Direction::In)?,
                "4" => self.check_loop(Direction::Out)?,
                "5" => {
                    let report = format_attendance(self.tracker.get_all_attendance());
                    write!(self.output, "{report}")?;
                }
                "6" => {
                    writeln!(self.output, "Ending Attendance!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
    }

    fn add_employees(&mut self) -> Result<()> {
        writeln!(self.output, "Add Employees:")?;
        loop {
            let first_name = self.read_non_empty("Enter first name:")?;
            let last_name = self.read_non_empty("Enter last name:")?;
            let role = self.read_non_empty("Enter role:")?;
            let reporting_to = self.read_reporting_to()?;

            let employee = self
                .tracker
                .add_employee(first_name, last_name, role, reporting_to);
            let id = employee.id;
            writeln!(self.output, "Successfully added! Employee ID: {id}")?;

            let again = self.prompt("Add another employee? (y/n):")?;
            if !again.trim().eq_ignore_ascii_case("y") {
                return Ok(());
            }
        }
    }

    fn check_loop(&mut self, direction: Direction) -> Result<()> {
        let label = direction.label();
        writeln!(self.output, "{}", direction.title())?;
        loop {
            let employee_id = self.read_employee_id()?;
            let timestamp = self.read_timestamp(direction)?;

            let result = match direction {
                Direction::In => self.tracker.check_in(employee_id, timestamp).map(|_| ()),
                Direction::Out => self.tracker.check_out(employee_id, timestamp).map(|_| ()),
            };
            match result {
                Ok(()) => writeln!(self.output, "Checked {label} successfully!")?,
                Err(AttendanceError::DuplicateCheckIn { .. }) => {
                    writeln!(self.output, "Already checked in.")?;
                }
                Err(err) => writeln!(self.output, "Cannot check {label}: {err}.")?,
            }

            let again = self.prompt(&format!(
                "Type 'exit' to stop or press Enter to check {label} another:"
            ))?;
            if again.trim().eq_ignore_ascii_case("exit") {
                return Ok(());
            }
        }
    }

    fn read_non_empty(&mut self, prompt: &str) -> Result<String> {
        loop {
            let line = self.prompt(prompt)?;
            if let Some(value) = non_empty(&line) {
                return Ok(value.to_string());
            }
            writeln!(self.output, "Invalid input.")?;
        }
    }

    fn read_reporting_to(&mut self) -> Result<Option<EmployeeId>> {
        loop {
            let line = self.prompt("Enter reporting to ID (0 for none):")?;
            match parse_reporting_to(&line) {
                Ok(reporting_to) => return Ok(reporting_to),
                Err(err) => {
                    tracing::debug!(%err, "rejected reporting-to input");
                    writeln!(self.output, "Invalid input.")?;
                }
            }
        }
    }

    fn read_employee_id(&mut self) -> Result<EmployeeId> {
        loop {
            let line = self.prompt("Enter your employee ID:")?;
            match line.parse::<EmployeeId>() {
                Ok(id) if self.tracker.is_valid_employee_id(id) => return Ok(id),
                _ => writeln!(self.output, "Invalid or ID not found.")?,
            }
        }
    }

    fn read_timestamp(&mut self, direction: Direction) -> Result<NaiveDateTime> {
        let label = direction.label();
        loop {
            let line = self.prompt(&format!(
                "Enter check-{label} date and time ({TIMESTAMP_HINT}) or press Enter for now:"
            ))?;
            let now = self.tracker.now();
            match parse_timestamp(&line, now) {
                Ok(timestamp) if timestamp > now => {
                    writeln!(
                        self.output,
                        "Check-{label} cannot be in the future. Try again."
                    )?;
                }
                Ok(timestamp) => return Ok(timestamp),
                Err(err) => {
                    tracing::debug!(%err, "rejected timestamp input");
                    writeln!(self.output, "Invalid date format. Try again.")?;
                }
            }
        }
    }

    /// Writes a prompt and reads one line, without its line terminator.
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

//! Input parsing shared by the menu prompts.

use anyhow::{Context, Result};
use attend_core::EmployeeId;
use chrono::NaiveDateTime;

/// Timestamp pattern accepted at the prompts (day-month-year hour:minute).
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Human-readable form of [`TIMESTAMP_FORMAT`] shown in prompts.
pub const TIMESTAMP_HINT: &str = "dd-MM-yyyy HH:mm";

/// Parse a timestamp entered at a prompt.
///
/// Blank input means `now`.
pub fn parse_timestamp(s: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(now);
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .with_context(|| format!("Invalid datetime: {s}. Use {TIMESTAMP_HINT}"))
}

/// Returns the trimmed input, or `None` if it is blank.
pub fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse a manager id. Any integer is accepted; zero or negative means no manager.
pub fn parse_reporting_to(s: &str) -> Result<Option<EmployeeId>> {
    let id: i64 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid reporting-to ID: {}", s.trim()))?;
    Ok(reporting_to_id(id))
}

/// Maps a raw manager id to an employee id. Zero and negative values mean no manager.
pub fn reporting_to_id(id: i64) -> Option<EmployeeId> {
    u64::try_from(id).ok().and_then(|id| EmployeeId::new(id).ok())
}

//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value is not a positive integer id.
    #[error("invalid employee ID: {value}")]
    InvalidEmployeeId { value: String },

    /// The first id handed out by a directory is above the allowed range.
    #[error("first employee ID {value} exceeds the maximum of {max}")]
    FirstIdOutOfRange { value: u64, max: u64 },
}

/// A validated employee identifier.
///
/// Ids are positive integers handed out by the [`Directory`](crate::Directory).
/// Zero is never a valid id; the text interface uses it to mean "no manager".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct EmployeeId(pub(crate) u64);

impl EmployeeId {
    /// Creates a new ID after validation.
    pub fn new(id: u64) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::InvalidEmployeeId {
                value: id.to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for EmployeeId {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeId> for u64 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

impl FromStr for EmployeeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "employee ID",
            });
        }
        let id = trimmed
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidEmployeeId {
                value: trimmed.to_string(),
            })?;
        Self::new(id)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drops seconds and sub-second precision from a timestamp.
///
/// Attendance is recorded at minute resolution.
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    #[test]
    fn employee_id_rejects_zero() {
        assert!(EmployeeId::new(0).is_err());
        assert_eq!(EmployeeId::new(101).unwrap().get(), 101);
    }

    #[test]
    fn employee_id_from_str() {
        assert_eq!(" 101 ".parse::<EmployeeId>().unwrap().get(), 101);
        assert_eq!(
            "".parse::<EmployeeId>().unwrap_err(),
            ValidationError::Empty {
                field: "employee ID"
            }
        );
        assert_eq!(
            "abc".parse::<EmployeeId>().unwrap_err().to_string(),
            "invalid employee ID: abc"
        );
        assert!("-5".parse::<EmployeeId>().is_err());
        assert!("0".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn employee_id_serializes_as_number() {
        let id = EmployeeId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: EmployeeId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<EmployeeId>("0").is_err());
    }

    #[test]
    fn truncate_to_minute_drops_seconds() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_milli_opt(9, 15, 42, 250)
            .unwrap();
        let truncated = truncate_to_minute(ts);
        assert_eq!(truncated.hour(), 9);
        assert_eq!(truncated.minute(), 15);
        assert_eq!(truncated.second(), 0);
        assert_eq!(truncated.nanosecond(), 0);
    }
}

//! Attendance ledger - admission rules for check-in and check-out.
//!
//! The ledger is an append-only log of [`AttendanceRecord`]s. A record is
//! created by a check-in and closed at most once by a check-out.
//!
//! # Rules
//!
//! - One record per employee per calendar day, keyed on the date of the
//!   check-in timestamp.
//! - A check-out is matched to the record whose check-in falls on the same
//!   calendar day as the check-out timestamp. An overnight shift therefore
//!   cannot be closed on the following day.
//! - Neither timestamp may be later than the current time.
//! - Rejections never mutate the log.
//!
//! Timestamps are truncated to whole minutes before they are compared or stored.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EmployeeId, truncate_to_minute};

/// Reasons a check-in or check-out is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// The employee already has a record for that day.
    #[error("employee {employee_id} already checked in on {day}")]
    DuplicateCheckIn {
        employee_id: EmployeeId,
        day: NaiveDate,
    },

    /// No check-in exists on the check-out's calendar day.
    #[error("employee {employee_id} has no check-in on {day}")]
    NoMatchingRecord {
        employee_id: EmployeeId,
        day: NaiveDate,
    },

    /// The day's record is already closed.
    #[error("employee {employee_id} already checked out on {day}")]
    AlreadyCheckedOut {
        employee_id: EmployeeId,
        day: NaiveDate,
    },

    /// Check-out precedes check-in.
    #[error("check-out at {check_out} is before check-in at {check_in}")]
    NonChronological {
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },

    /// The timestamp is later than the current time.
    #[error("timestamp {timestamp} is in the future (now: {now})")]
    FutureTimestamp {
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    },

    /// The employee id is not in the directory.
    #[error("unknown employee ID: {0}")]
    UnknownEmployee(EmployeeId),
}

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: EmployeeId,
    pub check_in_time: NaiveDateTime,
    /// Set by a successful check-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<NaiveDateTime>,
    /// Hours between check-in and check-out, set together with `check_out_time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worked_hours: Option<f64>,
}

impl AttendanceRecord {
    const fn open(employee_id: EmployeeId, check_in_time: NaiveDateTime) -> Self {
        Self {
            employee_id,
            check_in_time,
            check_out_time: None,
            worked_hours: None,
        }
    }

    /// The calendar day this record covers.
    pub fn day(&self) -> NaiveDate {
        self.check_in_time.date()
    }

    /// Whether the record has been closed by a check-out.
    pub const fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    /// Time between check-in and check-out, if checked out.
    pub fn worked_duration(&self) -> Option<TimeDelta> {
        self.check_out_time.map(|out| out - self.check_in_time)
    }

    fn close(&mut self, check_out_time: NaiveDateTime) {
        let worked = check_out_time - self.check_in_time;
        self.check_out_time = Some(check_out_time);
        self.worked_hours = Some(hours_from_minutes(worked.num_minutes()));
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "minute counts within a day are far below f64 precision limits"
)]
fn hours_from_minutes(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Append-only log of attendance records.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<AttendanceRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check-in.
    ///
    /// `now` is the current time, read once by the caller for this operation.
    /// The employee id is assumed to be known to the directory.
    pub fn check_in(
        &mut self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<&AttendanceRecord, AttendanceError> {
        let timestamp = truncate_to_minute(timestamp);
        if timestamp > now {
            return Err(AttendanceError::FutureTimestamp { timestamp, now });
        }

        let day = timestamp.date();
        if self.position(employee_id, day).is_some() {
            return Err(AttendanceError::DuplicateCheckIn { employee_id, day });
        }

        self.records.push(AttendanceRecord::open(employee_id, timestamp));
        tracing::debug!(%employee_id, %timestamp, "checked in");

        Ok(&self.records[self.records.len() - 1])
    }

    /// Records a check-out against the same-day check-in.
    ///
    /// Rejections are checked in order: no same-day record, already checked
    /// out, check-out before check-in, check-out in the future.
    pub fn check_out(
        &mut self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<&AttendanceRecord, AttendanceError> {
        let timestamp = truncate_to_minute(timestamp);
        let day = timestamp.date();

        let Some(idx) = self.position(employee_id, day) else {
            return Err(AttendanceError::NoMatchingRecord { employee_id, day });
        };
        let record = &mut self.records[idx];

        if record.is_checked_out() {
            return Err(AttendanceError::AlreadyCheckedOut { employee_id, day });
        }
        if timestamp < record.check_in_time {
            return Err(AttendanceError::NonChronological {
                check_in: record.check_in_time,
                check_out: timestamp,
            });
        }
        if timestamp > now {
            return Err(AttendanceError::FutureTimestamp { timestamp, now });
        }

        record.close(timestamp);
        tracing::debug!(
            %employee_id,
            %timestamp,
            worked_hours = record.worked_hours,
            "checked out"
        );

        Ok(record)
    }

    /// All records in check-in order.
    pub fn get_all_attendance(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Records belonging to one employee, in check-in order.
    pub fn records_for(&self, employee_id: EmployeeId) -> impl Iterator<Item = &AttendanceRecord> {
        self.records
            .iter()
            .filter(move |r| r.employee_id == employee_id)
    }

    fn position(&self, employee_id: EmployeeId, day: NaiveDate) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.employee_id == employee_id && r.day() == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Timelike;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(20, 12, 0)
    }

    fn emp(id: u64) -> EmployeeId {
        EmployeeId::new(id).unwrap()
    }

    #[test]
    fn check_in_creates_open_record() {
        let mut ledger = Ledger::new();
        let record = ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();

        assert_eq!(record.employee_id, emp(101));
        assert_eq!(record.check_in_time, at(10, 9, 0));
        assert_eq!(record.check_out_time, None);
        assert_eq!(record.worked_hours, None);
        assert_eq!(ledger.get_all_attendance().len(), 1);
    }

    #[test]
    fn second_check_in_same_day_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();

        let err = ledger.check_in(emp(101), at(10, 23, 59), now()).unwrap_err();
        assert_eq!(
            err,
            AttendanceError::DuplicateCheckIn {
                employee_id: emp(101),
                day: at(10, 0, 0).date(),
            }
        );
        assert_eq!(ledger.records_for(emp(101)).count(), 1);
    }

    #[test]
    fn check_ins_on_other_days_and_by_other_employees_are_independent() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        ledger.check_in(emp(102), at(10, 9, 0), now()).unwrap();
        ledger.check_in(emp(101), at(11, 0, 0), now()).unwrap();

        assert_eq!(ledger.get_all_attendance().len(), 3);
        assert_eq!(ledger.records_for(emp(101)).count(), 2);
    }

    #[test]
    fn future_check_in_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger.check_in(emp(101), at(20, 12, 1), now()).unwrap_err();
        assert!(matches!(err, AttendanceError::FutureTimestamp { .. }));
        assert!(ledger.get_all_attendance().is_empty());

        // Exactly now is allowed.
        assert!(ledger.check_in(emp(101), now(), now()).is_ok());
    }

    #[test]
    fn future_check_compares_the_minute_not_the_seconds() {
        let minute = at(20, 12, 0);
        let now = minute.with_second(10).unwrap();
        let mut ledger = Ledger::new();

        // 12:00:30 is after 12:00:10 but falls in the current minute.
        let record = ledger
            .check_in(emp(101), minute.with_second(30).unwrap(), now)
            .unwrap();
        assert_eq!(record.check_in_time, minute);

        let err = ledger.check_in(emp(102), at(20, 12, 1), now).unwrap_err();
        assert!(matches!(err, AttendanceError::FutureTimestamp { .. }));

        let record = ledger
            .check_out(emp(101), minute.with_second(59).unwrap(), now)
            .unwrap();
        assert_eq!(record.check_out_time, Some(minute));
    }

    #[test]
    fn check_in_truncates_to_minute() {
        let mut ledger = Ledger::new();
        let ts = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 45)
            .unwrap();
        let record = ledger.check_in(emp(101), ts, now()).unwrap();
        assert_eq!(record.check_in_time, at(10, 9, 0));
    }

    #[test]
    fn check_out_derives_worked_hours() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        let record = ledger.check_out(emp(101), at(10, 17, 30), now()).unwrap();

        assert_eq!(record.check_out_time, Some(at(10, 17, 30)));
        assert_eq!(record.worked_hours, Some(8.5));
        assert_eq!(record.worked_duration(), Some(TimeDelta::minutes(510)));
    }

    #[test]
    fn worked_hours_keeps_minute_fractions() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        let record = ledger.check_out(emp(101), at(10, 9, 20), now()).unwrap();
        let hours = record.worked_hours.unwrap();
        assert!((hours - 20.0 / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn check_out_at_check_in_time_gives_zero_hours() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        let record = ledger.check_out(emp(101), at(10, 9, 0), now()).unwrap();
        assert_eq!(record.worked_hours, Some(0.0));
    }

    #[test]
    fn second_check_out_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        ledger.check_out(emp(101), at(10, 17, 0), now()).unwrap();

        let err = ledger.check_out(emp(101), at(10, 18, 0), now()).unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyCheckedOut { .. }));
        assert_eq!(
            ledger.get_all_attendance()[0].check_out_time,
            Some(at(10, 17, 0))
        );
    }

    #[test]
    fn check_out_without_same_day_check_in_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 22, 0), now()).unwrap();

        let err = ledger.check_out(emp(101), at(11, 6, 0), now()).unwrap_err();
        assert_eq!(
            err,
            AttendanceError::NoMatchingRecord {
                employee_id: emp(101),
                day: at(11, 0, 0).date(),
            }
        );
        assert!(!ledger.get_all_attendance()[0].is_checked_out());
    }

    #[test]
    fn check_out_for_other_employee_does_not_match() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        let err = ledger.check_out(emp(102), at(10, 17, 0), now()).unwrap_err();
        assert!(matches!(err, AttendanceError::NoMatchingRecord { .. }));
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();

        let err = ledger.check_out(emp(101), at(10, 8, 59), now()).unwrap_err();
        assert_eq!(
            err,
            AttendanceError::NonChronological {
                check_in: at(10, 9, 0),
                check_out: at(10, 8, 59),
            }
        );
        assert!(!ledger.get_all_attendance()[0].is_checked_out());
    }

    #[test]
    fn future_check_out_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(20, 9, 0), now()).unwrap();

        let err = ledger.check_out(emp(101), at(20, 13, 0), now()).unwrap_err();
        assert!(matches!(err, AttendanceError::FutureTimestamp { .. }));
        assert!(!ledger.get_all_attendance()[0].is_checked_out());
    }

    #[test]
    fn already_checked_out_wins_over_other_rejections() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();
        ledger.check_out(emp(101), at(10, 17, 0), now()).unwrap();

        // Also before check-in, still reported as already checked out.
        let err = ledger.check_out(emp(101), at(10, 8, 0), now()).unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyCheckedOut { .. }));
    }

    #[test]
    fn records_keep_check_in_order() {
        let mut ledger = Ledger::new();
        ledger.check_in(emp(102), at(10, 8, 0), now()).unwrap();
        ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();

        let ids: Vec<_> = ledger
            .get_all_attendance()
            .iter()
            .map(|r| r.employee_id.get())
            .collect();
        assert_eq!(ids, [102, 101]);
    }

    #[test]
    fn open_record_serializes_without_check_out_fields() {
        let mut ledger = Ledger::new();
        let record = ledger.check_in(emp(101), at(10, 9, 0), now()).unwrap();

        let json = serde_json::to_string(record).unwrap();
        assert_eq!(
            json,
            r#"{"employee_id":101,"check_in_time":"2025-03-10T09:00:00"}"#
        );
    }
}

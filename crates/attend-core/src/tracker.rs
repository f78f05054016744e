//! The attendance tracker: directory and ledger behind one entry point.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;

use crate::clock::{Clock, SystemClock};
use crate::directory::{Directory, Employee};
use crate::ledger::{AttendanceError, AttendanceRecord, Ledger};
use crate::types::EmployeeId;

/// Owns the employee directory and the attendance ledger.
///
/// Check-in and check-out verify the employee against the directory before
/// the ledger sees the request, and read the clock once per call.
#[derive(Debug)]
pub struct AttendanceTracker<C = SystemClock> {
    directory: Directory,
    ledger: Ledger,
    clock: C,
}

impl Default for AttendanceTracker {
    fn default() -> Self {
        Self::new(Directory::new(), SystemClock)
    }
}

impl<C: Clock> AttendanceTracker<C> {
    /// Creates a tracker with an empty ledger.
    pub fn new(directory: Directory, clock: C) -> Self {
        Self {
            directory,
            ledger: Ledger::new(),
            clock,
        }
    }

    /// The current time according to the tracker's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn add_employee(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
        reporting_to: Option<EmployeeId>,
    ) -> &Employee {
        self.directory
            .add_employee(first_name, last_name, role, reporting_to)
    }

    pub fn list_all_employees(&self) -> &[Employee] {
        self.directory.list_all_employees()
    }

    pub fn is_valid_employee_id(&self, id: EmployeeId) -> bool {
        self.directory.is_valid_employee_id(id)
    }

    pub fn check_in(
        &mut self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
    ) -> Result<&AttendanceRecord, AttendanceError> {
        self.ensure_known(employee_id)?;
        let now = self.clock.now();
        self.ledger
            .check_in(employee_id, timestamp, now)
            .inspect_err(|err| tracing::debug!(%employee_id, %err, "check-in rejected"))
    }

    pub fn check_out(
        &mut self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
    ) -> Result<&AttendanceRecord, AttendanceError> {
        self.ensure_known(employee_id)?;
        let now = self.clock.now();
        self.ledger
            .check_out(employee_id, timestamp, now)
            .inspect_err(|err| tracing::debug!(%employee_id, %err, "check-out rejected"))
    }

    pub fn get_all_attendance(&self) -> &[AttendanceRecord] {
        self.ledger.get_all_attendance()
    }

    fn ensure_known(&self, employee_id: EmployeeId) -> Result<(), AttendanceError> {
        if self.directory.is_valid_employee_id(employee_id) {
            Ok(())
        } else {
            tracing::debug!(%employee_id, "unknown employee");
            Err(AttendanceError::UnknownEmployee(employee_id))
        }
    }
}

/// A tracker that can be shared between threads.
///
/// Every operation holds one lock for its whole check-then-act sequence, so
/// two concurrent check-ins for the same employee and day cannot both pass the
/// uniqueness check. Records are returned by value since the lock is released
/// on return.
#[derive(Debug)]
pub struct SharedTracker<C = SystemClock> {
    inner: Arc<Mutex<AttendanceTracker<C>>>,
}

impl<C> Clone for SharedTracker<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedTracker<C> {
    pub fn new(tracker: AttendanceTracker<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn add_employee(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
        reporting_to: Option<EmployeeId>,
    ) -> Employee {
        self.lock()
            .add_employee(first_name, last_name, role, reporting_to)
            .clone()
    }

    pub fn list_all_employees(&self) -> Vec<Employee> {
        self.lock().list_all_employees().to_vec()
    }

    pub fn is_valid_employee_id(&self, id: EmployeeId) -> bool {
        self.lock().is_valid_employee_id(id)
    }

    pub fn check_in(
        &self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.lock().check_in(employee_id, timestamp).cloned()
    }

    pub fn check_out(
        &self,
        employee_id: EmployeeId,
        timestamp: NaiveDateTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.lock().check_out(employee_id, timestamp).cloned()
    }

    pub fn get_all_attendance(&self) -> Vec<AttendanceRecord> {
        self.lock().get_all_attendance().to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, AttendanceTracker<C>> {
        // Operations validate before mutating, so a panic mid-operation
        // cannot leave a half-written record behind.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

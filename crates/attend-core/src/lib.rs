//! Core domain logic for employee attendance.
//!
//! This crate contains:
//! - Directory: the append-only registry of employees
//! - Ledger: check-in/check-out admission rules and worked-hours derivation
//! - Tracker: the entry point combining both, plus a thread-safe wrapper

pub mod clock;
mod directory;
mod ledger;
mod tracker;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{DEFAULT_FIRST_EMPLOYEE_ID, Directory, Employee, MAX_FIRST_EMPLOYEE_ID};
pub use ledger::{AttendanceError, AttendanceRecord, Ledger};
pub use tracker::{AttendanceTracker, SharedTracker};
pub use types::{EmployeeId, ValidationError};

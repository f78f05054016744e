//! Wall-clock access.

use chrono::{Local, NaiveDateTime};

/// Source of the current wall-clock time.
///
/// Ledger operations read the clock once and use that value for every
/// comparison they make.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

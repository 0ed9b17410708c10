//! Wall-clock abstraction.
//!
//! Transaction timestamps and every "today" / "last 7 days" boundary come from a [`Clock`]
//! injected into the ledger context. Production uses [`SystemClock`]; tests drive a
//! [`ManualClock`] so day boundaries are deterministic.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::{Mutex, PoisonError};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    time: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, time: NaiveDateTime) {
        *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
        *time += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.time.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

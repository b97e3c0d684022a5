//! Wall-clock source used to stamp walkthrough events.
//!
//! Phase timers run on Tokio's monotonic clock; this trait only covers the
//! human-readable timestamps recorded in a session journal.

use chrono::{DateTime, Utc};

/// Abstraction over wall-clock time so journals are reproducible in tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

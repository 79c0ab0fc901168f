//! Clock abstraction so lifecycle timestamps are injectable.
//!
//! Production code uses [`SystemClock`]; tests use [`FixedClock`] to make
//! `paid_at`/`delivered_at` deterministic.

use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};

use crate::types::Timestamp;

/// Source of the current time for lifecycle transitions.
pub trait Clock: Send + Sync {
    /// The current moment.
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at a settable instant, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<Timestamp>>,
}

impl FixedClock {
    /// Create a clock frozen at the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.write().expect("clock lock poisoned") = now;
    }

    /// Advance the clock by the given number of seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.write().expect("clock lock poisoned");
        let advanced = *now.as_datetime() + Duration::seconds(secs);
        *now = Timestamp::new(advanced);
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Timestamp::new(Utc::now()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().expect("clock lock poisoned")
    }
}

//! Time sources
//!
//! The engine never reads a clock. Callers pass "now" as a [`Timestamp`];
//! hosts convert from their own wall clock and tests step a [`FixedTime`].

use crate::constants::time::{MS_PER_MINUTE, MS_PER_SECOND};

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a source frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute timestamp
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }

    /// Move forward by whole seconds
    pub fn advance_secs(&mut self, secs: u64) {
        self.advance(secs * MS_PER_SECOND);
    }

    /// Move forward by whole minutes
    pub fn advance_minutes(&mut self, minutes: u64) {
        self.advance(minutes * MS_PER_MINUTE);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

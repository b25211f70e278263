//! Test clock that always reads the same instant.

use chrono::{DateTime, TimeZone, Utc};
use teleporter_core::clock::Clock;

/// A clock pinned to one point in time, so prompt timestamps are stable.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    /// 2026-01-15T10:00:00Z.
    fn default() -> Self {
        Self(Utc.timestamp_opt(1_768_471_200, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

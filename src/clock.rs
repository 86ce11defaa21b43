//! Ambient wall-clock
//!
//! Meal bucket selection reads the local hour and the pre-session advisor
//! measures lead time against "now". Both go through [`Clock`] so callers can
//! pin time in tests and reproducible runs.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

/// Source of the current local time
pub trait Clock: Send + Sync {
    /// Current instant, carrying the local UTC offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// Resolve a wall-clock time in this clock's zone.
    ///
    /// The default reads it in the offset of [`Clock::now`]. Returns `None`
    /// when the time does not exist or is ambiguous.
    fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.now().offset().from_local_datetime(naive).single()
    }
}

/// Server-local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    /// Uses the zone rules at `naive`'s own date, so a time across a DST
    /// change gets that day's offset. Ambiguous times take the earlier one;
    /// times skipped by a forward change fall back to the current offset.
    fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        Local
            .from_local_datetime(naive)
            .earliest()
            .map(|local| local.fixed_offset())
            .or_else(|| self.now().offset().from_local_datetime(naive).single())
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

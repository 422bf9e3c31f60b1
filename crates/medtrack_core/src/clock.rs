//! Injectable "current time" capability.
//!
//! # Responsibility
//! - Supply timestamps for create/update/mark-taken.
//! - Define what "today" means for the daily taken reset.
//!
//! # Invariants
//! - Calendar dates are evaluated in the clock's local offset, never UTC.
//! - Dates and displayed times of past instants come from the same
//!   [`Clock::local_time_of`] conversion.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeDelta, Utc};
use std::cell::Cell;

/// Source of the current instant and the local calendar.
pub trait Clock {
    /// Current instant carrying the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    /// Today's local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Local wall-clock time of an arbitrary instant.
    fn local_time_of(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(self.now().offset())
    }

    /// Local calendar date of an arbitrary instant.
    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_time_of(instant).date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }

    fn local_time_of(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        (**self).local_time_of(instant)
    }

    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).local_date_of(instant)
    }
}

/// Operating-system clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    // Uses the zone rules for `instant` itself, so a DST switch since then
    // does not shift its wall-clock time or date.
    fn local_time_of(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&Local).fixed_offset()
    }
}

/// Manually driven clock for deterministic timestamps.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    /// Moves the clock forward (or backward for negative deltas).
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

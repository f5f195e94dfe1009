//! Source of "now" and "today" for the engine.
//!
//! Payday countdowns depend on the calendar date in the user's time zone, so
//! the engine never calls `Utc::now()` directly for date math.

use std::fmt::Debug;

use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;

pub trait Clock: Send + Sync + Debug {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the clock's time zone.
    fn today(&self) -> NaiveDate;

    /// Current instant as epoch milliseconds.
    fn timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock. Without a time zone "today" follows the host's local zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    #[must_use]
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        let now = self.now();
        match self.timezone {
            Some(tz) => now.with_timezone(&tz).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }
}

/// Clock frozen at a given instant, used by tests and replays.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    timezone: Tz,
}

impl FixedClock {
    #[must_use]
    pub fn new(instant: DateTime<Utc>, timezone: Tz) -> Self {
        Self { instant, timezone }
    }

    /// Midday UTC of `date`, so the date is the same in every zone within
    /// twelve hours of UTC.
    #[must_use]
    pub fn on_date(date: NaiveDate) -> Self {
        let instant = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(instant, Tz::UTC)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn today(&self) -> NaiveDate {
        self.instant.with_timezone(&self.timezone).date_naive()
    }
}

//! Payday calendar arithmetic.
//!
//! A payday rule is a day of month:
//! - `1..=31` is the nominal day the salary arrives;
//! - `0` means "last day of month".
//!
//! When the nominal day does not exist in a month (31 in April, 30 in
//! February) the payday falls on the last day of that month instead.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Validated payday rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Payday(u8);

impl Payday {
    /// The "last day of month" rule.
    pub const LAST_DAY: Payday = Payday(0);

    pub fn new(day: i64) -> ResultEngine<Self> {
        if !(0..=31).contains(&day) {
            return Err(EngineError::InvalidPayday(format!(
                "Payday must be between 0 and 31, but was {day}"
            )));
        }
        Ok(Self(day as u8))
    }

    /// Raw rule value (`0` for last day of month).
    #[must_use]
    pub const fn day(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_last_day(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Payday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_last_day() {
            f.write_str("last day of month")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<i64> for Payday {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Payday::new(value)
    }
}

impl TryFrom<i32> for Payday {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Payday::new(i64::from(value))
    }
}

impl From<Payday> for i64 {
    fn from(value: Payday) -> Self {
        i64::from(value.0)
    }
}

impl FromStr for Payday {
    type Err = EngineError;

    /// Accepts a day number or `last`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("last") {
            return Ok(Payday::LAST_DAY);
        }
        let day: i64 = trimmed
            .parse()
            .map_err(|_| EngineError::InvalidPayday(format!("not a day of month: {trimmed}")))?;
        Payday::new(day)
    }
}

/// Gregorian leap year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
#[must_use]
pub const fn days_in_month(year: i32, month: Month) -> u32 {
    match month {
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// The concrete payday date within a month.
///
/// Payday `0` and any day past the end of the month resolve to the month's
/// last day.
pub fn payday_for_month(year: i32, month: Month, payday: Payday) -> ResultEngine<NaiveDate> {
    let last = days_in_month(year, month);
    let day = match u32::from(payday.day()) {
        0 => last,
        day if day > last => last,
        day => day,
    };
    let month_number = month.number_from_month();
    NaiveDate::from_ymd_opt(year, month_number, day).ok_or_else(|| {
        EngineError::InvalidDate(format!("{year}-{month_number:02}-{day:02} out of range"))
    })
}

/// The next payday on or after `from`.
pub fn next_payday(payday: Payday, from: NaiveDate) -> ResultEngine<NaiveDate> {
    let month = month_of(from)?;
    let current = payday_for_month(from.year(), month, payday)?;
    if from <= current {
        return Ok(current);
    }

    let (year, month) = if month == Month::December {
        (from.year() + 1, Month::January)
    } else {
        (from.year(), month.succ())
    };
    payday_for_month(year, month, payday)
}

/// Days from `from` until the next payday; `0` when `from` is payday.
pub fn days_until_payday(payday: Payday, from: NaiveDate) -> ResultEngine<i64> {
    let next = next_payday(payday, from)?;
    Ok((next - from).num_days())
}

/// Whether `date` is the payday of its own month.
pub fn is_payday(payday: Payday, date: NaiveDate) -> ResultEngine<bool> {
    let month = month_of(date)?;
    Ok(payday_for_month(date.year(), month, payday)? == date)
}

fn month_of(date: NaiveDate) -> ResultEngine<Month> {
    u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| EngineError::InvalidDate(format!("invalid month in {date}")))
}

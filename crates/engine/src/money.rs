use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

const PIASTERS_PER_POUND: i64 = 100;

/// Signed money amount represented as **integer minor units** (piasters for
/// EGP).
///
/// Use this type for **all** monetary values (salary, balances) to avoid
/// floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let salary = Money::new(8_500_050);
/// assert_eq!(salary.major(), 85_000);
/// assert_eq!(salary.format_whole(Currency::Egp), "85,000 EGP");
/// assert_eq!(salary.to_string(), "85,000.50 EGP");
/// ```
///
/// Parsing from user input (major units, `,` grouping, `.` decimals, at most
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("85,000".parse::<Money>().unwrap().minor(), 8_500_000);
/// assert_eq!("150.5 EGP".parse::<Money>().unwrap().minor(), 15_050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Converts a non-negative amount of whole pounds into piasters.
    ///
    /// `850` pounds become `85_000` piasters.
    pub fn from_major(major: i64) -> ResultEngine<Self> {
        if major < 0 {
            return Err(EngineError::InvalidAmount(format!(
                "Currency value cannot be negative: {major}"
            )));
        }
        major
            .checked_mul(PIASTERS_PER_POUND)
            .map(Money)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Whole major units; the fractional part is discarded (truncates toward
    /// zero).
    #[must_use]
    pub const fn major(self) -> i64 {
        piasters_to_pounds(self.0)
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Formats whole major units with thousands separators.
    ///
    /// Piasters are truncated, so `50` renders as `0 EGP` and `-50` loses
    /// its sign.
    #[must_use]
    pub fn format_whole(self, currency: Currency) -> String {
        let major = self.0 / currency.minor_per_major();
        let sign = if major < 0 { "-" } else { "" };
        format!(
            "{sign}{} {}",
            group_thousands(major.unsigned_abs()),
            currency.code()
        )
    }

    /// Formats the amount with its fraction digits, e.g. `-85,000.50 EGP`.
    #[must_use]
    pub fn format_with_decimals(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = currency.minor_per_major().unsigned_abs();
        let major = abs / per_major;
        let minor = abs % per_major;
        let width = usize::from(currency.minor_units());
        format!(
            "{sign}{}.{minor:0width$} {}",
            group_thousands(major),
            currency.code()
        )
    }
}

/// Pounds to piasters without validation.
#[must_use]
pub const fn pounds_to_piasters(pounds: i64) -> i64 {
    pounds * PIASTERS_PER_POUND
}

/// Piasters to whole pounds; fractional piasters are discarded.
#[must_use]
pub const fn piasters_to_pounds(piasters: i64) -> i64 {
    piasters / PIASTERS_PER_POUND
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_decimals(Currency::default()))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string in major units into minor units.
    ///
    /// Accepts an optional leading `+`/`-`, `,` as thousands separator, `.`
    /// as decimal separator and an optional trailing currency code.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - groups after the first `,` must have exactly 3 digits
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let mut trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        if let Some((amount, code)) = trimmed.rsplit_once(char::is_whitespace)
            && code.chars().all(|c| c.is_ascii_alphabetic())
        {
            Currency::try_from(code)?;
            trimmed = amount.trim_end();
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        if rest.is_empty() {
            return Err(empty());
        }
        if rest.starts_with(char::is_whitespace) {
            return Err(invalid());
        }

        let (major_str, minor_str) = match rest.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (rest, None),
        };

        let mut groups = major_str.split(',');
        let mut digits = String::with_capacity(major_str.len());
        let first = groups.next().ok_or_else(invalid)?;
        if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let grouped = major_str.contains(',');
        if grouped && first.len() > 3 {
            return Err(invalid());
        }
        digits.push_str(first);
        for group in groups {
            if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.push_str(group);
        }

        // The magnitude of i64::MIN does not fit in i64, so sum in i128.
        let major: u64 = digits.parse().map_err(|_| overflow())?;

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let magnitude =
            i128::from(major) * i128::from(PIASTERS_PER_POUND) + i128::from(minor);
        let signed = if negative { -magnitude } else { magnitude };

        i64::try_from(signed).map(Money).map_err(|_| overflow())
    }
}

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code attached to the profile and its money values.
///
/// Flosyn is mono-currency today (default `EGP`), but the engine models
/// currency explicitly so formatting never hard-codes a suffix.
///
/// ## Minor units
///
/// Monetary values are stored as an `i64` number of **minor units** (see
/// `Money`). `minor_units()` returns how many decimal digits separate:
/// - major units (human input/output, e.g. `85,000.50 EGP`)
/// - minor units (stored integers, e.g. `8500050` piasters)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Egp,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Egp => "EGP",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    ///
    /// Example: EGP uses 2 fraction digits (piasters).
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Egp => 2,
        }
    }

    /// How many minor units make one major unit (100 piasters per pound).
    #[must_use]
    pub const fn minor_per_major(self) -> i64 {
        10i64.pow(self.minor_units() as u32)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EGP" => Ok(Currency::Egp),
            other => Err(EngineError::CurrencyMismatch(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}

//! Figures derived from the profile for display.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Currency, Money, Payday, ResultEngine, UserProfile, payday};

/// Where the user stands relative to the next salary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaydayStatus {
    pub today: NaiveDate,
    pub payday: Payday,
    pub next_payday: NaiveDate,
    pub days_until: i64,
    pub is_today: bool,
    /// Only known when the status comes from a stored profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl PaydayStatus {
    /// Countdown for a bare payday rule, with no salary attached.
    pub fn for_rule(payday: Payday, today: NaiveDate) -> ResultEngine<Self> {
        let next_payday = payday::next_payday(payday, today)?;
        let days_until = (next_payday - today).num_days();
        Ok(Self {
            today,
            payday,
            next_payday,
            days_until,
            is_today: days_until == 0,
            salary: None,
            currency: None,
        })
    }

    pub fn compute(profile: &UserProfile, today: NaiveDate) -> ResultEngine<Self> {
        Ok(Self {
            salary: Some(profile.salary),
            currency: Some(profile.currency),
            ..Self::for_rule(profile.payday, today)?
        })
    }

    /// Salary in whole pounds, e.g. `85,000 EGP`.
    #[must_use]
    pub fn salary_display(&self) -> Option<String> {
        self.salary
            .map(|salary| salary.format_whole(self.currency.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn profile(payday: i64) -> UserProfile {
        let at = Utc.timestamp_millis_opt(0).unwrap();
        UserProfile::new(8_500_000, payday, Currency::Egp, at, at).unwrap()
    }

    #[test]
    fn counts_down_to_payday() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let status = PaydayStatus::compute(&profile(25), today).unwrap();

        assert_eq!(status.next_payday, NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        assert_eq!(status.days_until, 10);
        assert!(!status.is_today);
        assert_eq!(status.salary_display(), Some("85,000 EGP".to_string()));
    }

    #[test]
    fn bare_rule_has_no_salary() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let status = PaydayStatus::for_rule(Payday::LAST_DAY, today).unwrap();

        assert_eq!(status.next_payday, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(status.days_until, 18);
        assert_eq!(status.salary, None);
        assert_eq!(status.salary_display(), None);
    }

    #[test]
    fn flags_payday() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        let status = PaydayStatus::compute(&profile(31), today).unwrap();

        assert_eq!(status.days_until, 0);
        assert!(status.is_today);
    }
}

//! The module contains `UserProfile` struct and its storage model.
//!
//! The profile is the user's financial setup: monthly salary, payday rule and
//! currency. Flosyn keeps a single profile at a time; a missing profile means
//! the user has not been onboarded yet.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, Money, Payday, ResultEngine, util};

/// The user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Storage id; `0` until the profile has been inserted.
    pub id: i64,
    /// Monthly salary in minor units. Never negative.
    pub salary: Money,
    pub payday: Payday,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds a profile that has not been stored yet.
    ///
    /// Fails when `salary_minor` is negative or `payday` is outside `0..=31`.
    pub fn new(
        salary_minor: i64,
        payday: i64,
        currency: Currency,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Self::with_id(0, salary_minor, payday, currency, created_at, updated_at)
    }

    pub fn with_id(
        id: i64,
        salary_minor: i64,
        payday: i64,
        currency: Currency,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let salary = util::validate_salary(salary_minor)?;
        let payday = Payday::new(payday)?;
        Ok(Self {
            id,
            salary,
            payday,
            currency,
            created_at,
            updated_at,
        })
    }

    /// `true` when the profile has not been persisted.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub salary_minor: i64,
    pub payday: i32,
    pub currency: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for UserProfile {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let currency = util::model_currency(&model.currency, "currency")?;
        let created_at = util::datetime_from_millis(model.created_at, "created_at")?;
        let updated_at = util::datetime_from_millis(model.updated_at, "updated_at")?;
        UserProfile::with_id(
            model.id,
            model.salary_minor,
            i64::from(model.payday),
            currency,
            created_at,
            updated_at,
        )
    }
}

impl From<&UserProfile> for ActiveModel {
    fn from(value: &UserProfile) -> Self {
        Self {
            id: if value.is_new() {
                ActiveValue::NotSet
            } else {
                ActiveValue::Set(value.id)
            },
            salary_minor: ActiveValue::Set(value.salary.minor()),
            payday: ActiveValue::Set(i32::from(value.payday.day())),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            created_at: ActiveValue::Set(value.created_at.timestamp_millis()),
            updated_at: ActiveValue::Set(value.updated_at.timestamp_millis()),
        }
    }
}

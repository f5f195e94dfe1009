use sea_orm::{ActiveModelTrait, TransactionTrait, prelude::*};
use tokio::sync::watch;

use crate::{
    Currency, EngineError, Money, Payday, ResultEngine, UserProfile, profiles, util,
};

use super::{Engine, first_profile, with_tx};

impl Engine {
    /// Inserts a profile, replacing the stored row with the same id.
    ///
    /// A profile with `id == 0` always gets a fresh auto-generated id.
    pub async fn insert_profile(&self, profile: &UserProfile) -> ResultEngine<UserProfile> {
        let stored = with_tx!(self, |db_tx| {
            let exists = !profile.is_new()
                && profiles::Entity::find_by_id(profile.id)
                    .one(&db_tx)
                    .await?
                    .is_some();
            let active: profiles::ActiveModel = profile.into();
            let model = if exists {
                active.update(&db_tx).await?
            } else {
                active.insert(&db_tx).await?
            };
            UserProfile::try_from(model)
        })?;

        tracing::info!(profile_id = stored.id, "profile stored");
        self.publish_current().await;
        Ok(stored)
    }

    /// Updates an existing profile.
    pub async fn update_profile(&self, profile: &UserProfile) -> ResultEngine<UserProfile> {
        if profile.is_new() {
            return Err(EngineError::KeyNotFound("profile not stored".to_string()));
        }
        let stored = with_tx!(self, |db_tx| {
            profiles::Entity::find_by_id(profile.id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("profile {}", profile.id)))?;
            let active: profiles::ActiveModel = profile.into();
            let model = active.update(&db_tx).await?;
            UserProfile::try_from(model)
        })?;

        tracing::info!(profile_id = stored.id, "profile updated");
        self.publish_current().await;
        Ok(stored)
    }

    /// Returns the stored profile, or `None` when onboarding has not happened.
    pub async fn profile(&self) -> ResultEngine<Option<UserProfile>> {
        let profile = first_profile(&self.database).await?;
        tracing::debug!(found = profile.is_some(), "profile read");
        Ok(profile)
    }

    /// Subscribes to the profile.
    ///
    /// The receiver holds the current profile and sees every change made
    /// through this engine (`None` after a reset).
    pub fn observe_profile(&self) -> watch::Receiver<Option<UserProfile>> {
        self.profile_tx.subscribe()
    }

    /// Deletes every stored profile. Returns the number of removed rows.
    pub async fn delete_all_profiles(&self) -> ResultEngine<u64> {
        let removed = with_tx!(self, |db_tx| {
            let res = profiles::Entity::delete_many().exec(&db_tx).await?;
            Ok::<_, EngineError>(res.rows_affected)
        })?;

        tracing::info!(removed, "profiles deleted");
        self.publish_current().await;
        Ok(removed)
    }

    /// Creates the profile on first use, otherwise replaces salary, payday and
    /// currency on the stored one.
    ///
    /// `created_at` is preserved across updates; `updated_at` comes from the
    /// engine clock.
    pub async fn save_profile(
        &self,
        salary: Money,
        payday: Payday,
        currency: Currency,
    ) -> ResultEngine<UserProfile> {
        let salary = util::validate_salary(salary.minor())?;
        let now = self.clock.now();
        let stored = with_tx!(self, |db_tx| {
            let model = match first_profile(&db_tx).await? {
                Some(existing) => {
                    let profile = UserProfile {
                        salary,
                        payday,
                        currency,
                        updated_at: now,
                        ..existing
                    };
                    let active: profiles::ActiveModel = (&profile).into();
                    active.update(&db_tx).await?
                }
                None => {
                    let profile = UserProfile {
                        id: 0,
                        salary,
                        payday,
                        currency,
                        created_at: now,
                        updated_at: now,
                    };
                    let active: profiles::ActiveModel = (&profile).into();
                    active.insert(&db_tx).await?
                }
            };
            UserProfile::try_from(model)
        })?;

        tracing::info!(
            profile_id = stored.id,
            payday = stored.payday.day(),
            "profile saved"
        );
        self.publish_current().await;
        Ok(stored)
    }
}

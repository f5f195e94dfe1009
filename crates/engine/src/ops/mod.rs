use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, prelude::*};
use tokio::sync::watch;

use crate::{Clock, ResultEngine, SystemClock, UserProfile, profiles};

mod calendar;
mod profile;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    clock: Arc<dyn Clock>,
    profile_tx: watch::Sender<Option<UserProfile>>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The clock used for "today" and for profile timestamps.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Re-read the current profile and push it to observers.
    ///
    /// Runs after a commit, so a failed re-read must not turn the write into
    /// an error; observers keep their previous value instead.
    async fn publish_current(&self) {
        match first_profile(&self.database).await {
            Ok(current) => {
                self.profile_tx.send_replace(current);
            }
            Err(err) => tracing::warn!("profile committed but observers not refreshed: {err}"),
        }
    }
}

/// The profile with the lowest id. Flosyn keeps a single profile, so this
/// is "the" profile.
async fn first_profile<C: ConnectionTrait>(db: &C) -> ResultEngine<Option<UserProfile>> {
    profiles::Entity::find()
        .order_by_asc(profiles::Column::Id)
        .one(db)
        .await?
        .map(UserProfile::try_from)
        .transpose()
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    clock: Option<Arc<dyn Clock>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the clock (defaults to the system clock in the local zone).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> EngineBuilder {
        self.clock = Some(clock);
        self
    }

    /// Construct `Engine`, loading the stored profile for observers.
    pub async fn build(self) -> ResultEngine<Engine> {
        let current = first_profile(&self.database).await?;
        let (profile_tx, _) = watch::channel(current);
        Ok(Engine {
            database: self.database,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::default()) as Arc<dyn Clock>),
            profile_tx,
        })
    }
}

//! Flosyn engine: money, payday calendar and the persisted user profile.
//!
//! All monetary values are integer minor units (see [`Money`]). Date math for
//! paydays lives in [`payday`] and is pure; [`Engine`] adds storage on top of
//! a sea-orm connection.

pub use clock::{Clock, FixedClock, SystemClock};
pub use currency::Currency;
pub use error::EngineError;
pub use insights::PaydayStatus;
pub use money::{Money, piasters_to_pounds, pounds_to_piasters};
pub use ops::{Engine, EngineBuilder};
pub use payday::Payday;
pub use profiles::UserProfile;

mod clock;
mod currency;
mod error;
mod insights;
mod money;
mod ops;
pub mod payday;
pub mod profiles;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

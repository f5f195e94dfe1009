use crate::{
    Payday, PaydayStatus, ResultEngine,
    payday::{days_until_payday, is_payday},
};

use super::Engine;

impl Engine {
    /// Days from the clock's today until the next payday.
    pub fn days_until_payday_today(&self, payday: Payday) -> ResultEngine<i64> {
        days_until_payday(payday, self.clock.today())
    }

    /// Whether the clock's today is payday.
    pub fn is_payday_today(&self, payday: Payday) -> ResultEngine<bool> {
        is_payday(payday, self.clock.today())
    }

    /// Payday countdown for the stored profile; `None` before onboarding.
    pub async fn payday_status(&self) -> ResultEngine<Option<PaydayStatus>> {
        let today = self.clock.today();
        self.profile()
            .await?
            .map(|profile| PaydayStatus::compute(&profile, today))
            .transpose()
    }
}

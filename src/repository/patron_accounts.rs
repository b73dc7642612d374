use super::{client::cache_buster, resource::RestResource};
use crate::{
    error::AppResult,
    models::{Page, PageRequest, PatronAccount},
};

const STATUS_PATH: &str = "api/patron-accounts-status";

impl RestResource<PatronAccount> {
    /// Patron account bound to the authenticated user
    pub async fn current(&self) -> AppResult<PatronAccount> {
        let path = format!("{}/user", self.path());
        self.client.get_json(&path, &[]).await
    }

    /// Activate or deactivate the user behind an account
    pub async fn set_activated(
        &self,
        account: &PatronAccount,
        activated: bool,
    ) -> AppResult<PatronAccount> {
        let card = self.require_key(account)?;
        let path = format!("{}/{}?activated={}", STATUS_PATH, card, activated);
        let updated: PatronAccount = self.client.put_json(&path, account).await?;
        tracing::info!("Patron {} activated={}", card, activated);
        Ok(updated)
    }

    /// Accounts that no longer meet the borrowing conditions
    pub async fn not_enough_condition(&self, page: &PageRequest) -> AppResult<Page<PatronAccount>> {
        let path = format!("{}/not-enough-condition", self.path());
        let query = [
            ("page", page.page.to_string()),
            ("size", page.size.to_string()),
            cache_buster(),
        ];
        self.client.get_page(&path, &query).await
    }
}

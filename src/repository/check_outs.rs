//! Check-out queries for patrons and administrators

use super::{client::cache_buster, resource::RestResource};
use crate::{
    error::{AppError, AppResult},
    models::{CheckOut, CheckOutView, Page, Status},
};

const PATRON_CHECK_OUTS_PATH: &str = "api/check-outs-client";

impl RestResource<CheckOut> {
    /// A patron's own check-outs for the given view
    pub async fn list_for_patron(
        &self,
        card_number: &str,
        view: CheckOutView,
    ) -> AppResult<Page<CheckOut>> {
        let query = [
            ("returned", view.returned_flag().to_string()),
            ("cardNumber", card_number.to_string()),
            ("status", view.status().to_string()),
            cache_buster(),
        ];
        self.client.get_page(PATRON_CHECK_OUTS_PATH, &query).await
    }

    /// Every check-out of one patron, regardless of status
    pub async fn list_by_patron_number(&self, card_number: &str) -> AppResult<Vec<CheckOut>> {
        let card = card_number.trim();
        if card.is_empty() {
            return Err(AppError::Validation("A card number is required".to_string()));
        }
        let path = format!("{}/patron-account", self.path());
        self.client
            .get_json(&path, &[("patronNumber", card.to_string())])
            .await
    }

    pub async fn list_by_status(&self, status: Status) -> AppResult<Vec<CheckOut>> {
        let path = format!("{}/status", self.path());
        self.client
            .get_json(&path, &[("Status", status.to_string())])
            .await
    }
}

//! Check-out management after creation: patron listings, cancellation, and
//! the administrator status workflow.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{CheckOut, CheckOutView, Page, Status},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_for_patron(
        &self,
        card_number: &str,
        view: CheckOutView,
    ) -> AppResult<Page<CheckOut>> {
        if card_number.trim().is_empty() {
            return Err(AppError::Validation("Card number is required".to_string()));
        }
        self.repository
            .check_outs
            .list_for_patron(card_number.trim(), view)
            .await
    }

    /// Check-outs of the logged-in patron
    pub async fn list_own(&self, view: CheckOutView) -> AppResult<Page<CheckOut>> {
        let patron = self.repository.patron_accounts.current().await?;
        self.list_for_patron(&patron.card_number, view).await
    }

    /// Pending requests awaiting an administrator
    pub async fn pending(&self) -> AppResult<Vec<CheckOut>> {
        self.repository.check_outs.list_by_status(Status::Pending).await
    }

    /// Patron withdraws a pending request
    pub async fn cancel(&self, check_out_id: i64) -> AppResult<CheckOut> {
        self.set_status(check_out_id, Status::Canceled).await
    }

    /// Administrator decision on a pending request
    pub async fn set_status(&self, check_out_id: i64, status: Status) -> AppResult<CheckOut> {
        let mut check_out = self.repository.check_outs.get(check_out_id).await?;
        check_out.apply_status(status, Utc::now())?;
        let updated = self.repository.check_outs.update(&check_out).await?;
        tracing::info!("Check-out {} moved to {}", check_out_id, status);
        Ok(updated)
    }

    /// Record the copy as back on the shelf
    pub async fn mark_returned(&self, check_out_id: i64) -> AppResult<CheckOut> {
        let mut check_out = self.repository.check_outs.get(check_out_id).await?;
        check_out.mark_returned()?;
        let updated = self.repository.check_outs.update(&check_out).await?;
        tracing::info!("Check-out {} returned", check_out_id);
        Ok(updated)
    }

    /// Delete a check-out that never left the pending state
    pub async fn delete_pending(&self, check_out_id: i64) -> AppResult<()> {
        let check_out = self.repository.check_outs.get(check_out_id).await?;
        if check_out.status() != Status::Pending {
            return Err(AppError::BusinessRule(format!(
                "Check-out {} is {} and cannot be deleted",
                check_out_id,
                check_out.status()
            )));
        }
        self.repository.check_outs.delete(check_out_id).await
    }
}

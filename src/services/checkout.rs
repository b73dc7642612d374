//! Borrow request construction and submission

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use super::availability::{Availability, CopyPrecheck};
use crate::{
    error::{AppError, AppResult},
    models::{CheckOut, NewCheckOut, PatronAccount},
    repository::LibraryGateway,
};

/// Why a borrow request cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutBlock {
    /// No due date chosen; the page marks the date field invalid
    MissingDueDate,
    /// The book has no copies at all, only the wait list is open
    NoCopies,
    /// Nothing resolved for the selection, or its amount is zero
    Unavailable,
}

/// Due date as midnight UTC, `2024-06-01T00:00:00.000Z`
pub fn end_time_iso(due_date: NaiveDate) -> String {
    let midnight = due_date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&midnight)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Check every borrow precondition and build the request body.
/// A missing due date is reported before anything else.
pub fn build_check_out(
    due_date: Option<NaiveDate>,
    precheck: &CopyPrecheck,
    availability: Option<&Availability>,
    patron: &PatronAccount,
) -> Result<NewCheckOut, CheckoutBlock> {
    let due_date = due_date.ok_or(CheckoutBlock::MissingDueDate)?;
    if !precheck.has_copies() {
        return Err(CheckoutBlock::NoCopies);
    }
    let copy = match availability {
        Some(Availability::Found(copy)) if copy.is_loanable() => copy,
        _ => return Err(CheckoutBlock::Unavailable),
    };

    Ok(NewCheckOut {
        end_time: end_time_iso(due_date),
        book_copy: copy.clone(),
        patron_account: patron.clone(),
    })
}

#[derive(Clone)]
pub struct CheckoutService {
    gateway: Arc<dyn LibraryGateway>,
}

impl CheckoutService {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self { gateway }
    }

    pub async fn submit(&self, request: &NewCheckOut) -> AppResult<CheckOut> {
        if request.patron_account.card_number.trim().is_empty() {
            return Err(AppError::Validation(
                "A patron account is required to borrow".to_string(),
            ));
        }

        let created = self.gateway.create_check_out(request).await?;
        tracing::info!(
            "Check-out {:?} requested by {} for copy {:?} until {}",
            created.id,
            request.patron_account.card_number,
            request.book_copy.id,
            request.end_time
        );
        Ok(created)
    }
}

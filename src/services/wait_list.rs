//! Wait-list enrollment for books without any copy

use std::sync::Arc;

use super::availability::CopyPrecheck;
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewWaitList, PatronAccount, WaitList},
    repository::LibraryGateway,
};

/// Build the enrollment body, or `None` when the book has copies and the
/// borrow path applies instead.
pub fn build_wait_list(
    precheck: &CopyPrecheck,
    book: &Book,
    patron: &PatronAccount,
) -> Option<NewWaitList> {
    if precheck.has_copies() {
        return None;
    }
    Some(NewWaitList {
        book: book.clone(),
        patron_account: patron.clone(),
    })
}

#[derive(Clone)]
pub struct WaitListService {
    gateway: Arc<dyn LibraryGateway>,
}

impl WaitListService {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self { gateway }
    }

    pub async fn submit(&self, request: &NewWaitList) -> AppResult<WaitList> {
        if request.book.id.is_none() {
            return Err(AppError::Validation(
                "Cannot join the wait list of an unsaved book".to_string(),
            ));
        }

        let created = self.gateway.create_wait_list(request).await?;
        tracing::info!(
            "Patron {} joined the wait list of book {:?}",
            request.patron_account.card_number,
            request.book.id
        );
        Ok(created)
    }
}

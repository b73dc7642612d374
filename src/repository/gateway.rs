//! The backend operations the borrow flow depends on

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookCopy, CheckOut, NewCheckOut, NewWaitList, PatronAccount, Publisher, WaitList},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryGateway: Send + Sync {
    /// Book detail with its embedded copies
    async fn fetch_book(&self, book_id: i64) -> AppResult<Book>;

    async fn list_publishers(&self) -> AppResult<Vec<Publisher>>;

    /// Copies with loanable stock; empty when only the wait list is open
    async fn check_book_available(&self, book_id: i64) -> AppResult<Vec<BookCopy>>;

    async fn find_copy(
        &self,
        book_id: i64,
        year: i32,
        publisher_id: i64,
    ) -> AppResult<Option<BookCopy>>;

    async fn create_check_out(&self, request: &NewCheckOut) -> AppResult<CheckOut>;

    async fn create_wait_list(&self, request: &NewWaitList) -> AppResult<WaitList>;

    async fn current_patron(&self) -> AppResult<PatronAccount>;
}

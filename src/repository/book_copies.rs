//! Book copy lookups beyond plain CRUD

use super::{client::cache_buster, resource::RestResource};
use crate::{
    error::AppResult,
    models::{BookCopy, Page, PageRequest},
};

impl RestResource<BookCopy> {
    /// Copies of the book that still have loanable stock. Empty means the
    /// book can only be wait-listed.
    pub async fn check_book_available(&self, book_id: i64) -> AppResult<Vec<BookCopy>> {
        let path = format!("{}/check-book-available", self.path());
        self.client
            .get_json(&path, &[("bookId", book_id.to_string()), cache_buster()])
            .await
    }

    /// The copy printed by `publisher_id` in `year`, if any
    pub async fn find_by_year_publisher(
        &self,
        book_id: i64,
        year: i32,
        publisher_id: i64,
    ) -> AppResult<Option<BookCopy>> {
        let path = format!("{}/publish-year", self.path());
        let query = [
            ("bookId", book_id.to_string()),
            ("year", year.to_string()),
            ("publisherId", publisher_id.to_string()),
        ];
        let copy: Option<BookCopy> = self.client.get_optional(&path, &query).await?;
        Ok(copy.filter(|c| !c.is_placeholder()))
    }

    /// All copies of one book, paged
    pub async fn list_by_book(&self, book_id: i64, page: &PageRequest) -> AppResult<Page<BookCopy>> {
        let path = format!("{}/book", self.path());
        let mut query = vec![("bookId", book_id.to_string())];
        query.extend(page.query_pairs());
        query.push(cache_buster());
        self.client.get_page(&path, &query).await
    }
}

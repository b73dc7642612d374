//! Repository layer: typed access to the library REST API

pub mod book_copies;
pub mod check_outs;
pub mod client;
pub mod gateway;
pub mod images;
pub mod patron_accounts;
pub mod resource;
pub mod wait_lists;

use async_trait::async_trait;

pub use client::ApiClient;
pub use gateway::LibraryGateway;
pub use images::ImageStore;
pub use resource::{Entity, RestResource};

use crate::{
    config::AppConfig,
    error::AppResult,
    models::{
        Author, Book, BookCopy, Category, CheckOut, NewCheckOut, NewWaitList, Notification,
        PatronAccount, Publisher, WaitList,
    },
};

/// One typed resource per backend collection
#[derive(Clone)]
pub struct Repository {
    pub categories: RestResource<Category>,
    pub authors: RestResource<Author>,
    pub books: RestResource<Book>,
    pub book_copies: RestResource<BookCopy>,
    pub publishers: RestResource<Publisher>,
    pub check_outs: RestResource<CheckOut>,
    pub wait_lists: RestResource<WaitList>,
    pub patron_accounts: RestResource<PatronAccount>,
    pub notifications: RestResource<Notification>,
    pub images: ImageStore,
}

impl Repository {
    /// Create a repository talking to the configured backend
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = ApiClient::new(&config.api, &config.auth)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            categories: RestResource::new(client.clone(), "api/categories", "api/_search/categories"),
            authors: RestResource::new(client.clone(), "api/authors", "api/_search/authors"),
            books: RestResource::new(client.clone(), "api/books", "api/_search/books"),
            book_copies: RestResource::new(client.clone(), "api/book-copies", "api/_search/book-copies"),
            publishers: RestResource::new(client.clone(), "api/publishers", "api/_search/publishers"),
            check_outs: RestResource::new(client.clone(), "api/check-outs", "api/_search/check-outs"),
            wait_lists: RestResource::new(client.clone(), "api/wait-lists", "api/_search/wait-lists"),
            patron_accounts: RestResource::new(client.clone(), "api/patron-accounts", "api/_search/patron-accounts"),
            notifications: RestResource::new(client.clone(), "api/notifications", "api/_search/notifications"),
            images: ImageStore::new(client),
        }
    }
}

#[async_trait]
impl LibraryGateway for Repository {
    async fn fetch_book(&self, book_id: i64) -> AppResult<Book> {
        self.books.get(book_id).await
    }

    async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.publishers.list_all().await
    }

    async fn check_book_available(&self, book_id: i64) -> AppResult<Vec<BookCopy>> {
        self.book_copies.check_book_available(book_id).await
    }

    async fn find_copy(
        &self,
        book_id: i64,
        year: i32,
        publisher_id: i64,
    ) -> AppResult<Option<BookCopy>> {
        self.book_copies
            .find_by_year_publisher(book_id, year, publisher_id)
            .await
    }

    async fn create_check_out(&self, request: &NewCheckOut) -> AppResult<CheckOut> {
        self.check_outs.submit(request).await
    }

    async fn create_wait_list(&self, request: &NewWaitList) -> AppResult<WaitList> {
        self.wait_lists.submit(request).await
    }

    async fn current_patron(&self) -> AppResult<PatronAccount> {
        self.patron_accounts.current().await
    }
}

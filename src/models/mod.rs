//! Data models for the System Library client

pub mod book;
pub mod book_copy;
pub mod checkout;
pub mod patron;
pub mod publisher;
pub mod wait_list;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use book::{Author, Book, Category};
pub use book_copy::BookCopy;
pub use checkout::{CheckOut, CheckOutView, NewCheckOut, Status};
pub use patron::{Notification, PatronAccount, User};
pub use publisher::Publisher;
pub use wait_list::{NewWaitList, WaitList};

/// Default page size used by list screens
pub const ITEMS_PER_PAGE: u32 = 20;

/// Paging and sorting parameters for list/search requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// Spring-style sort expression, e.g. `id,asc`
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: ITEMS_PER_PAGE,
            sort: Some("id,asc".to_string()),
        }
    }
}

impl PageRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(ref sort) = self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

/// One page of entities plus the backend's total count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

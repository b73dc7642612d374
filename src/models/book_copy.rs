//! Book copy (edition by publisher and year) model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::book::Book;
use super::publisher::Publisher;

/// A printed edition of a book with its remaining loanable quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookCopy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Box<Book>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
}

impl BookCopy {
    /// The backend answers a lookup miss with an empty object rather than 404.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }

    /// Remaining quantity, absent counted as zero
    pub fn available(&self) -> i32 {
        self.amount.unwrap_or(0).max(0)
    }

    pub fn is_loanable(&self) -> bool {
        self.available() > 0
    }
}

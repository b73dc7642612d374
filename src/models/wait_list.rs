//! Wait list model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::book::Book;
use super::patron::PatronAccount;

/// Queue entry for a book with no loanable copy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WaitList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    // Backend field name, typo included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creat_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patron_account: Option<PatronAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Box<Book>>,
}

/// Create wait-list request body; the backend stamps `creatAt`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWaitList {
    pub book: Book,
    pub patron_account: PatronAccount,
}

//! Check-out (borrow request) model and lifecycle rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::book_copy::BookCopy;
use super::patron::PatronAccount;
use crate::error::{AppError, AppResult};

/// Check-out request status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    Confirmed,
    Refused,
    Canceled,
}

impl Status {
    /// Only a pending request can move, and only once.
    pub fn can_move_to(self, next: Status) -> bool {
        matches!(
            (self, next),
            (Status::Pending, Status::Confirmed)
                | (Status::Pending, Status::Refused)
                | (Status::Pending, Status::Canceled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Confirmed => "Confirmed",
            Status::Refused => "Refused",
            Status::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check-out as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_returned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_copy: Option<BookCopy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patron_account: Option<PatronAccount>,
}

impl CheckOut {
    pub fn status(&self) -> Status {
        self.status.unwrap_or_default()
    }

    pub fn returned(&self) -> bool {
        self.is_returned.unwrap_or(false)
    }

    /// Move to `next`, enforcing the transition table and the due-date rule
    /// for confirmation.
    pub fn apply_status(&mut self, next: Status, now: DateTime<Utc>) -> AppResult<()> {
        let current = self.status();
        if !current.can_move_to(next) {
            return Err(AppError::BusinessRule(format!(
                "Check-out cannot move from {} to {}",
                current, next
            )));
        }
        if next == Status::Confirmed && self.end_time.map_or(true, |end| end <= now) {
            return Err(AppError::BusinessRule(
                "End time is less than current time!".to_string(),
            ));
        }
        self.status = Some(next);
        Ok(())
    }

    /// Flag the copy as back in the library; only confirmed loans qualify.
    pub fn mark_returned(&mut self) -> AppResult<()> {
        if self.status() != Status::Confirmed {
            return Err(AppError::BusinessRule(format!(
                "Only confirmed check-outs can be returned (status is {})",
                self.status()
            )));
        }
        if self.returned() {
            return Err(AppError::BusinessRule(
                "Check-out is already returned".to_string(),
            ));
        }
        self.is_returned = Some(true);
        Ok(())
    }
}

/// Create check-out request body. `startTime` and `status` are defaulted
/// by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckOut {
    /// ISO-8601 with millisecond precision, e.g. `2024-06-01T00:00:00.000Z`
    pub end_time: String,
    pub book_copy: BookCopy,
    pub patron_account: PatronAccount,
}

/// Which of a patron's check-outs to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutView {
    /// Open requests in the given status
    Borrowed(Status),
    /// Confirmed loans, returned or not
    Returned,
}

impl CheckOutView {
    /// The returned view always queries confirmed loans.
    pub fn status(self) -> Status {
        match self {
            CheckOutView::Borrowed(status) => status,
            CheckOutView::Returned => Status::Confirmed,
        }
    }

    pub fn returned_flag(self) -> bool {
        matches!(self, CheckOutView::Returned)
    }
}

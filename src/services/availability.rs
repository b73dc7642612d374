//! Copy availability: the book-wide precheck and the per-selection resolver.
//!
//! Selector changes can fire several lookups back to back. Each lookup
//! carries a ticket with a sequence number and only the ticket issued last
//! may update what the page shows.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::{
    error::AppResult,
    models::BookCopy,
    repository::LibraryGateway,
};

/// Result of the "does any loanable copy exist" query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyPrecheck {
    pub copies: Vec<BookCopy>,
}

impl CopyPrecheck {
    pub fn has_copies(&self) -> bool {
        !self.copies.is_empty()
    }
}

/// Outcome of resolving one (book, publisher, year) tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    Found(BookCopy),
    NoMatch,
}

impl Availability {
    pub fn from_copy(copy: Option<BookCopy>) -> Self {
        match copy {
            Some(copy) if !copy.is_placeholder() => Availability::Found(copy),
            _ => Availability::NoMatch,
        }
    }

    /// Remaining quantity, zero when nothing matched
    pub fn amount(&self) -> i32 {
        match self {
            Availability::Found(copy) => copy.available(),
            Availability::NoMatch => 0,
        }
    }

    pub fn copy(&self) -> Option<&BookCopy> {
        match self {
            Availability::Found(copy) => Some(copy),
            Availability::NoMatch => None,
        }
    }

    pub fn can_borrow(&self) -> bool {
        self.amount() > 0
    }
}

/// One issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveTicket {
    pub seq: u64,
    pub book_id: i64,
    pub publisher_id: i64,
    pub year: i32,
}

/// Whether a selection may be resolved at all: the book must have copies
/// and both selectors must hold a real value.
pub fn should_resolve(
    precheck: &CopyPrecheck,
    publisher_id: Option<i64>,
    year: Option<i32>,
) -> Option<(i64, i32)> {
    if !precheck.has_copies() {
        return None;
    }
    match (publisher_id, year) {
        (Some(publisher), Some(year)) if publisher > 0 && year > 0 => Some((publisher, year)),
        _ => None,
    }
}

#[derive(Clone)]
pub struct AvailabilityResolver {
    gateway: Arc<dyn LibraryGateway>,
    latest: Arc<AtomicU64>,
}

impl AvailabilityResolver {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self {
            gateway,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn precheck(&self, book_id: i64) -> AppResult<CopyPrecheck> {
        let copies = self.gateway.check_book_available(book_id).await?;
        tracing::debug!("Book {} precheck found {} copies", book_id, copies.len());
        Ok(CopyPrecheck { copies })
    }

    /// Start a new lookup. Every ticket issued before this one becomes stale.
    pub fn issue(&self, book_id: i64, publisher_id: i64, year: i32) -> ResolveTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        ResolveTicket {
            seq,
            book_id,
            publisher_id,
            year,
        }
    }

    /// Drop every outstanding ticket without issuing a new one
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: &ResolveTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.seq
    }

    /// Query the backend for a ticket, regardless of staleness
    pub async fn fetch(&self, ticket: &ResolveTicket) -> AppResult<Availability> {
        let copy = self
            .gateway
            .find_copy(ticket.book_id, ticket.year, ticket.publisher_id)
            .await?;
        Ok(Availability::from_copy(copy))
    }
}

//! Patron borrow page for one book.
//!
//! Loads the book, the publishers, the patron and the copy precheck, then
//! offers either the borrow path (publisher and year selectors, due date,
//! remaining quantity) or the wait-list path when the book has no copy.

use std::sync::Arc;

use chrono::NaiveDate;

use super::{navigation::Navigator, notifier::Notifier};
use crate::{
    error::{AppError, AppResult},
    models::{CheckOut, PatronAccount, Publisher, WaitList},
    services::{
        availability::{should_resolve, Availability, CopyPrecheck, ResolveTicket},
        catalog::{Carousel, CarouselImage, CatalogSnapshot},
        checkout::{build_check_out, CheckoutBlock},
        wait_list::build_wait_list,
        BorrowServices,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    ReadyNoCopies,
    ReadyHasCopies,
    Resolving,
    Resolved,
    Submitting,
    Done,
}

/// The single action button the page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Borrow { enabled: bool },
    JoinWaitList { enabled: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Submitted(T),
    /// No due date; the date field is now marked invalid
    InvalidDate,
    /// The action is not available in the current state
    Disabled,
}

/// Render model of the page
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub state: PageState,
    pub title: String,
    pub authors: String,
    pub publishers: Vec<Publisher>,
    pub years: Vec<i32>,
    pub selected_publisher: Option<i64>,
    pub selected_year: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub date_invalid: bool,
    /// Remaining quantity of the resolved copy, `None` while unknown
    pub amount: Option<i32>,
    pub action: Option<PageAction>,
    pub images: Vec<CarouselImage>,
}

pub struct BorrowPage {
    book_id: i64,
    services: BorrowServices,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: PageState,
    snapshot: Option<CatalogSnapshot>,
    precheck: CopyPrecheck,
    patron: Option<PatronAccount>,
    publisher_id: Option<i64>,
    year: Option<i32>,
    due_date: Option<NaiveDate>,
    date_invalid: bool,
    availability: Option<Availability>,
    carousel: Carousel,
    update_success: bool,
}

impl BorrowPage {
    pub fn new(
        book_id: i64,
        services: BorrowServices,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            book_id,
            services,
            navigator,
            notifier,
            state: PageState::Loading,
            snapshot: None,
            precheck: CopyPrecheck::default(),
            patron: None,
            publisher_id: None,
            year: None,
            due_date: None,
            date_invalid: false,
            availability: None,
            carousel: Carousel::default(),
            update_success: false,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn availability(&self) -> Option<&Availability> {
        self.availability.as_ref()
    }

    pub fn update_success(&self) -> bool {
        self.update_success
    }

    fn ready_state(&self) -> PageState {
        if self.precheck.has_copies() {
            PageState::ReadyHasCopies
        } else {
            PageState::ReadyNoCopies
        }
    }

    /// Load everything the page shows, apply the default selection and
    /// resolve it. On a catalog failure the page stays in `Loading`.
    /// Without a patron account the page still renders with its action
    /// disabled.
    pub async fn mount(&mut self) -> AppResult<()> {
        let services = self.services.clone();
        let book_id = self.book_id;
        let (patron, loaded) = tokio::join!(services.catalog.current_patron(), async {
            tokio::try_join!(
                services.availability.precheck(book_id),
                services.catalog.load(book_id),
            )
        });
        let (precheck, snapshot) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Failed to load borrow page for book {}: {}", self.book_id, e);
                self.notifier.error(&e);
                return Err(e);
            }
        };

        self.patron = match patron {
            Ok(patron) => Some(patron),
            Err(e) => {
                tracing::warn!("No patron account for the current user: {}", e);
                None
            }
        };
        self.publisher_id = snapshot.default_publisher();
        self.year = snapshot.default_year();
        self.precheck = precheck;
        self.snapshot = Some(snapshot);
        self.state = self.ready_state();
        tracing::info!(
            "Borrow page ready for book {} ({:?})",
            self.book_id,
            self.state
        );

        if let Some(ticket) = self.begin_resolve() {
            self.run_resolve(ticket).await;
        }
        Ok(())
    }

    /// Drop the previous result and start a lookup for the current
    /// selection when it is resolvable.
    fn begin_resolve(&mut self) -> Option<ResolveTicket> {
        self.availability = None;
        match should_resolve(&self.precheck, self.publisher_id, self.year) {
            Some((publisher_id, year)) => {
                self.state = PageState::Resolving;
                Some(self.services.availability.issue(self.book_id, publisher_id, year))
            }
            None => {
                self.services.availability.invalidate();
                self.state = self.ready_state();
                None
            }
        }
    }

    fn selection_locked(&self) -> bool {
        matches!(
            self.state,
            PageState::Loading | PageState::Submitting | PageState::Done
        )
    }

    /// Change the publisher. Returns the lookup to run, if any.
    pub fn set_publisher(&mut self, publisher_id: Option<i64>) -> Option<ResolveTicket> {
        if self.selection_locked() {
            return None;
        }
        self.publisher_id = publisher_id;
        self.date_invalid = false;
        self.begin_resolve()
    }

    /// Change the year. Returns the lookup to run, if any.
    pub fn set_year(&mut self, year: Option<i32>) -> Option<ResolveTicket> {
        if self.selection_locked() {
            return None;
        }
        self.year = year;
        self.date_invalid = false;
        self.begin_resolve()
    }

    pub async fn select_publisher(&mut self, publisher_id: Option<i64>) {
        if let Some(ticket) = self.set_publisher(publisher_id) {
            self.run_resolve(ticket).await;
        }
    }

    pub async fn select_year(&mut self, year: Option<i32>) {
        if let Some(ticket) = self.set_year(year) {
            self.run_resolve(ticket).await;
        }
    }

    async fn run_resolve(&mut self, ticket: ResolveTicket) {
        let result = self.services.availability.fetch(&ticket).await;
        self.apply_resolution(&ticket, result);
    }

    /// Apply a lookup result. Results of superseded tickets are dropped and
    /// `false` is returned.
    pub fn apply_resolution(
        &mut self,
        ticket: &ResolveTicket,
        result: AppResult<Availability>,
    ) -> bool {
        if !self.services.availability.is_current(ticket) || self.state != PageState::Resolving {
            tracing::warn!(
                "Ignoring stale availability for publisher {} year {}",
                ticket.publisher_id,
                ticket.year
            );
            return false;
        }

        match result {
            Ok(availability) => {
                tracing::debug!(
                    "Publisher {} year {} has {} copies left",
                    ticket.publisher_id,
                    ticket.year,
                    availability.amount()
                );
                self.availability = Some(availability);
                self.state = PageState::Resolved;
            }
            Err(e) => {
                self.notifier.error(&e);
                self.state = self.ready_state();
            }
        }
        true
    }

    pub fn select_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
        if due_date.is_some() {
            self.date_invalid = false;
        }
    }

    pub fn next_image(&mut self) {
        let len = self.snapshot.as_ref().map_or(0, |s| s.images.len());
        self.carousel.next(len);
    }

    pub fn prev_image(&mut self) {
        let len = self.snapshot.as_ref().map_or(0, |s| s.images.len());
        self.carousel.prev(len);
    }

    fn action(&self) -> Option<PageAction> {
        if self.state == PageState::Loading {
            return None;
        }
        let open = self.patron.is_some()
            && !matches!(self.state, PageState::Submitting | PageState::Done);
        if self.precheck.has_copies() {
            let can_borrow = self.availability.as_ref().map_or(false, Availability::can_borrow);
            Some(PageAction::Borrow {
                enabled: can_borrow && open,
            })
        } else {
            Some(PageAction::JoinWaitList { enabled: open })
        }
    }

    pub fn view(&self) -> PageView {
        let selected_image = self
            .availability
            .as_ref()
            .and_then(Availability::copy)
            .and_then(|copy| copy.image.as_deref());

        match &self.snapshot {
            Some(snapshot) => PageView {
                state: self.state,
                title: snapshot.book.title.clone(),
                authors: snapshot.book.author_names(),
                publishers: snapshot.publishers.clone(),
                years: snapshot.years.clone(),
                selected_publisher: self.publisher_id,
                selected_year: self.year,
                due_date: self.due_date,
                date_invalid: self.date_invalid,
                amount: self.availability.as_ref().map(Availability::amount),
                action: self.action(),
                images: snapshot.visible_images(self.carousel.start, selected_image),
            },
            None => PageView {
                state: self.state,
                title: String::new(),
                authors: String::new(),
                publishers: Vec::new(),
                years: Vec::new(),
                selected_publisher: self.publisher_id,
                selected_year: self.year,
                due_date: self.due_date,
                date_invalid: self.date_invalid,
                amount: None,
                action: None,
                images: Vec::new(),
            },
        }
    }

    fn finish(&mut self, message: &str) {
        self.update_success = true;
        self.state = PageState::Done;
        self.notifier.success(message);
        self.navigator.back();
    }

    fn fail(&mut self, previous: PageState, error: &AppError) {
        tracing::error!("Submission for book {} failed: {}", self.book_id, error);
        self.notifier.error(error);
        self.state = previous;
    }

    /// Submit a borrow request for the resolved copy
    pub async fn borrow(&mut self) -> AppResult<SubmitOutcome<CheckOut>> {
        if !matches!(self.action(), Some(PageAction::Borrow { .. }))
            || self.state == PageState::Resolving
        {
            return Ok(SubmitOutcome::Disabled);
        }
        let patron = match &self.patron {
            Some(patron) => patron,
            None => return Ok(SubmitOutcome::Disabled),
        };

        let request = match build_check_out(
            self.due_date,
            &self.precheck,
            self.availability.as_ref(),
            patron,
        ) {
            Ok(request) => request,
            Err(CheckoutBlock::MissingDueDate) => {
                tracing::warn!("Borrow attempted without a due date");
                self.date_invalid = true;
                return Ok(SubmitOutcome::InvalidDate);
            }
            Err(block) => {
                tracing::warn!("Borrow blocked: {:?}", block);
                return Ok(SubmitOutcome::Disabled);
            }
        };

        let previous = self.state;
        self.state = PageState::Submitting;
        match self.services.checkout.submit(&request).await {
            Ok(created) => {
                self.finish("Borrow request sent");
                Ok(SubmitOutcome::Submitted(created))
            }
            Err(e) => {
                self.fail(previous, &e);
                Err(e)
            }
        }
    }

    /// Join the wait list of a book with no copies
    pub async fn join_wait_list(&mut self) -> AppResult<SubmitOutcome<WaitList>> {
        if self.state != PageState::ReadyNoCopies {
            return Ok(SubmitOutcome::Disabled);
        }
        let request = match (&self.snapshot, &self.patron) {
            (Some(snapshot), Some(patron)) => {
                build_wait_list(&self.precheck, &snapshot.book, patron)
            }
            _ => None,
        };
        let request = match request {
            Some(request) => request,
            None => return Ok(SubmitOutcome::Disabled),
        };

        let previous = self.state;
        self.state = PageState::Submitting;
        match self.services.wait_list.submit(&request).await {
            Ok(created) => {
                self.finish("Added to the wait list");
                Ok(SubmitOutcome::Submitted(created))
            }
            Err(e) => {
                self.fail(previous, &e);
                Err(e)
            }
        }
    }
}

//! Catalog snapshot for the borrow page: book detail, publishers, and the
//! values derived from the book's copies.

use std::{collections::BTreeSet, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookCopy, PatronAccount, Publisher},
    repository::LibraryGateway,
};

/// Number of copy thumbnails shown at once
pub const CAROUSEL_WINDOW: usize = 4;

/// Distinct publication years of the copies, most recent first
pub fn distinct_years_desc(copies: &[BookCopy]) -> Vec<i32> {
    let years: BTreeSet<i32> = copies.iter().filter_map(|c| c.year_published).collect();
    years.into_iter().rev().collect()
}

/// Copy images in copy order
pub fn copy_images(copies: &[BookCopy]) -> Vec<String> {
    copies.iter().filter_map(|c| c.image.clone()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselImage {
    pub url: String,
    pub selected: bool,
}

/// Everything the borrow page needs from the catalog
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub book: Book,
    pub publishers: Vec<Publisher>,
    pub years: Vec<i32>,
    pub images: Vec<String>,
}

impl CatalogSnapshot {
    pub fn new(book: Book, publishers: Vec<Publisher>) -> Self {
        let years = distinct_years_desc(book.copies());
        let images = copy_images(book.copies());
        Self {
            book,
            publishers,
            years,
            images,
        }
    }

    /// First publisher in list order
    pub fn default_publisher(&self) -> Option<i64> {
        self.publishers.iter().find_map(|p| p.id)
    }

    /// Most recent year
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// Up to `CAROUSEL_WINDOW` images starting at `start`, wrapping around.
    /// `selected` marks the image of the currently resolved copy.
    pub fn visible_images(&self, start: usize, selected: Option<&str>) -> Vec<CarouselImage> {
        let len = self.images.len();
        (0..len.min(CAROUSEL_WINDOW))
            .map(|offset| {
                let url = &self.images[(start + offset) % len];
                CarouselImage {
                    url: url.clone(),
                    selected: selected == Some(url.as_str()),
                }
            })
            .collect()
    }
}

/// Rotating start index over the copy images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    pub start: usize,
}

impl Carousel {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.start = (self.start + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.start = (self.start + len - 1) % len;
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn LibraryGateway>,
}

impl CatalogService {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the book and the publisher list
    pub async fn load(&self, book_id: i64) -> AppResult<CatalogSnapshot> {
        if book_id <= 0 {
            return Err(AppError::Validation(format!("Invalid book id {}", book_id)));
        }

        let (publishers, book) = tokio::try_join!(
            self.gateway.list_publishers(),
            self.gateway.fetch_book(book_id),
        )?;

        let snapshot = CatalogSnapshot::new(book, publishers);
        tracing::debug!(
            "Book {} has {} copies over years {:?}",
            book_id,
            snapshot.book.copies().len(),
            snapshot.years
        );
        Ok(snapshot)
    }

    /// Patron account of the logged-in user
    pub async fn current_patron(&self) -> AppResult<PatronAccount> {
        self.gateway.current_patron().await
    }
}

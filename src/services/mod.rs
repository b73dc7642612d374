//! Business logic services

pub mod availability;
pub mod catalog;
pub mod checkout;
pub mod loans;
pub mod wait_list;

use std::sync::Arc;

use crate::repository::{LibraryGateway, Repository};

/// Services behind the borrow page. They only need the gateway, so tests
/// can run them against a mock backend.
#[derive(Clone)]
pub struct BorrowServices {
    pub catalog: catalog::CatalogService,
    pub availability: availability::AvailabilityResolver,
    pub checkout: checkout::CheckoutService,
    pub wait_list: wait_list::WaitListService,
}

impl BorrowServices {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(gateway.clone()),
            availability: availability::AvailabilityResolver::new(gateway.clone()),
            checkout: checkout::CheckoutService::new(gateway.clone()),
            wait_list: wait_list::WaitListService::new(gateway),
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub borrow: BorrowServices,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        let gateway: Arc<dyn LibraryGateway> = Arc::new(repository.clone());
        Self {
            borrow: BorrowServices::new(gateway),
            loans: loans::LoansService::new(repository),
        }
    }
}

//! System Library client
//!
//! Typed access to the library REST backend (catalog, copies, check-outs,
//! wait lists, patron accounts) and the patron borrow flow built on top of
//! it: copy availability by publisher and year, borrow requests, and
//! wait-list enrollment.

pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

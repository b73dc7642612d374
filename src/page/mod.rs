//! Presentation layer: page state machines, navigation and notices

pub mod borrow;
pub mod breadcrumb;
pub mod navigation;
pub mod notifier;

pub use borrow::{BorrowPage, PageAction, PageState, PageView, SubmitOutcome};
pub use breadcrumb::{breadcrumbs, Crumb};
pub use navigation::{HistoryNavigator, Navigator, Route};
pub use notifier::{Notifier, TracingNotifier};

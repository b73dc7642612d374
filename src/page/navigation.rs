//! Application routes and the navigation callback handed to pages

use std::sync::Mutex;

use crate::models::Status;

/// Entity collections with list/detail/edit pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Publisher,
    Category,
    PatronAccount,
    Book,
    BookCopy,
    CheckOut,
    WaitList,
    Notification,
}

impl EntityKind {
    pub fn segment(self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Publisher => "publisher",
            EntityKind::Category => "category",
            EntityKind::PatronAccount => "patron-account",
            EntityKind::Book => "book",
            EntityKind::BookCopy => "book-copy",
            EntityKind::CheckOut => "check-out",
            EntityKind::WaitList => "wait-list",
            EntityKind::Notification => "notification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityPage {
    List,
    New,
    Detail(String),
    Edit(String),
    Delete(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    UserManagement,
    Tracker,
    Metrics,
    Health,
    Configuration,
    Logs,
    Docs,
}

impl AdminPage {
    fn segment(self) -> &'static str {
        match self {
            AdminPage::UserManagement => "user-management",
            AdminPage::Tracker => "tracker",
            AdminPage::Metrics => "metrics",
            AdminPage::Health => "health",
            AdminPage::Configuration => "configuration",
            AdminPage::Logs => "logs",
            AdminPage::Docs => "docs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Logout,
    Register,
    Entity(EntityKind, EntityPage),
    /// Patron borrow page for one book
    BorrowBook(i64),
    /// Patron's open requests
    CheckOutClientBorrow,
    /// Patron's confirmed loans
    CheckOutClientReturn,
    Admin(AdminPage),
}

impl Route {
    pub fn list(kind: EntityKind) -> Self {
        Route::Entity(kind, EntityPage::List)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::Register => "/account/register".to_string(),
            Route::Entity(kind, page) => {
                let base = kind.segment();
                match page {
                    EntityPage::List => format!("/{}", base),
                    EntityPage::New => format!("/{}/new", base),
                    EntityPage::Detail(id) => format!("/{}/{}", base, id),
                    EntityPage::Edit(id) => format!("/{}/{}/edit", base, id),
                    EntityPage::Delete(id) => format!("/{}/{}/delete", base, id),
                }
            }
            Route::BorrowBook(book_id) => format!("/book/{}/borrow", book_id),
            Route::CheckOutClientBorrow => "/check-out-client/borrow".to_string(),
            Route::CheckOutClientReturn => "/check-out-client/return".to_string(),
            Route::Admin(page) => format!("/admin/{}", page.segment()),
        }
    }

    /// Path plus the query the menu links carry
    pub fn href(&self) -> String {
        match self {
            Route::CheckOutClientBorrow => {
                format!("{}?returned=false&status={}", self.path(), Status::Pending)
            }
            Route::CheckOutClientReturn => {
                format!("{}?returned=true&status={}", self.path(), Status::Confirmed)
            }
            _ => self.path(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Return to the previous view
    fn back(&self);

    fn go(&self, path: &str);
}

/// In-memory history stack
#[derive(Debug)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            stack: Mutex::new(vec![start.to_string()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.stack.lock().ok().and_then(|stack| stack.last().cloned())
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().map(|stack| stack.len()).unwrap_or(0)
    }
}

impl Navigator for HistoryNavigator {
    fn back(&self) {
        if let Ok(mut stack) = self.stack.lock() {
            // The first entry stays, like a browser at the start of history
            if stack.len() > 1 {
                stack.pop();
            }
            tracing::debug!("Navigated back to {:?}", stack.last());
        }
    }

    fn go(&self, path: &str) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.push(path.to_string());
        }
        tracing::debug!("Navigated to {}", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::list(EntityKind::BookCopy).path(), "/book-copy");
        assert_eq!(
            Route::Entity(EntityKind::PatronAccount, EntityPage::Edit("C-1".into())).path(),
            "/patron-account/C-1/edit"
        );
        assert_eq!(
            Route::Entity(EntityKind::CheckOut, EntityPage::New).path(),
            "/check-out/new"
        );
        assert_eq!(Route::BorrowBook(7).path(), "/book/7/borrow");
        assert_eq!(Route::Admin(AdminPage::UserManagement).path(), "/admin/user-management");
    }

    #[test]
    fn test_client_hrefs_carry_filters() {
        assert_eq!(
            Route::CheckOutClientBorrow.href(),
            "/check-out-client/borrow?returned=false&status=Pending"
        );
        assert_eq!(
            Route::CheckOutClientReturn.href(),
            "/check-out-client/return?returned=true&status=Confirmed"
        );
        assert_eq!(Route::list(EntityKind::Book).href(), "/book");
    }

    #[test]
    fn test_history_back_keeps_first_entry() {
        let navigator = HistoryNavigator::new("/book");
        navigator.go("/book/3/borrow");
        assert_eq!(navigator.current().as_deref(), Some("/book/3/borrow"));

        navigator.back();
        assert_eq!(navigator.current().as_deref(), Some("/book"));
        navigator.back();
        assert_eq!(navigator.depth(), 1);
    }
}

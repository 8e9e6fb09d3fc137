//! Page controllers for the login, signup, dashboard and logout flows.
//!
//! Each controller takes a [`PageContext`] and reports where the user should
//! go next. Controllers never see storage failures; the identity store has
//! already degraded them to safe defaults.

use std::fmt;
use std::sync::Arc;

use identity_store::{RecordStore, SessionManager, Storage};

pub mod dashboard;
pub mod login;
pub mod logout;
pub mod signup;

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    Home,
    /// Login form.
    Login,
    /// Role-specific dashboard.
    Dashboard,
}

impl Route {
    /// Path the route is served from.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Per-page-load handles onto the identity store.
///
/// Both handles share one storage instance. There is no teardown; a context
/// lives for a single page load or command.
#[derive(Debug)]
pub struct PageContext<S: ?Sized> {
    store: RecordStore<S>,
    session: SessionManager<S>,
}

impl<S: Storage + ?Sized> PageContext<S> {
    /// Build the record store and session manager over `storage`.
    #[must_use]
    pub fn init(storage: Arc<S>) -> Self {
        Self {
            store: RecordStore::new(Arc::clone(&storage)),
            session: SessionManager::new(storage),
        }
    }

    /// User directory handle.
    #[must_use]
    pub const fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Session pointer handle.
    #[must_use]
    pub const fn session(&self) -> &SessionManager<S> {
        &self.session
    }
}

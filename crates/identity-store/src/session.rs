//! The "current user" pointer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::email::normalize_email;
use crate::record_store::RecordStore;
use crate::storage::{CURRENT_USER_KEY, Storage};
use crate::user::UserRecord;

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity is persisted.
    LoggedOut,
    /// A normalised email is persisted as the active identity.
    ///
    /// The email is not guaranteed to exist in the directory until the
    /// session has been [resolved](SessionManager::resolve).
    LoggedIn(String),
}

/// Manages the single persisted session pointer.
///
/// Like [`RecordStore`], every storage failure is logged and absorbed.
#[derive(Debug)]
pub struct SessionManager<S: ?Sized> {
    storage: Arc<S>,
}

impl<S: ?Sized> Clone for SessionManager<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: ?Sized> SessionManager<S> {
    /// Create a manager over a shared storage handle.
    #[must_use]
    pub const fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl<S> SessionManager<S>
where
    S: Storage + ?Sized,
{
    /// Persist `email`, normalised, as the active identity.
    ///
    /// No existence check is made; [`Self::resolve`] clears pointers that
    /// turn out to dangle.
    pub fn login(&self, email: impl AsRef<str>) {
        let normalized = normalize_email(email.as_ref());
        match self.storage.set_item(CURRENT_USER_KEY, &normalized) {
            Ok(()) => info!("session started"),
            Err(err) => warn!(error = %err, key = CURRENT_USER_KEY, "session not persisted"),
        }
    }

    /// Return the active identity, if any.
    ///
    /// Blank pointers and storage failures read as logged out.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        let raw = match self.storage.get_item(CURRENT_USER_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, key = CURRENT_USER_KEY, "treating session as logged out");
                return None;
            }
        };
        let normalized = normalize_email(&raw);
        (!normalized.is_empty()).then_some(normalized)
    }

    /// Clear the active identity.
    pub fn logout(&self) {
        match self.storage.remove_item(CURRENT_USER_KEY) {
            Ok(()) => info!("session ended"),
            Err(err) => warn!(error = %err, key = CURRENT_USER_KEY, "session not cleared"),
        }
    }

    /// Join the active identity against `store`.
    ///
    /// A pointer to an email with no directory entry is cleared and the
    /// session reads as logged out from then on.
    #[must_use]
    pub fn resolve<T>(&self, store: &RecordStore<T>) -> Option<UserRecord>
    where
        T: Storage + ?Sized,
    {
        let email = self.current()?;
        let record = store.get(&email);
        if record.is_none() {
            debug!("session points at an unknown account; clearing it");
            self.logout();
        }
        record
    }

    /// Report the current [`SessionState`].
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.current()
            .map_or(SessionState::LoggedOut, SessionState::LoggedIn)
    }
}

//! The user directory store.
//!
//! [`RecordStore`] owns the persisted `users` document. It re-sanitises on
//! every read and every write: the backing storage is shared with other
//! tabs, manual edits and older releases, so a single validation pass at
//! one boundary is not enough.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::email::Email;
use crate::error::{CreateUserError, StoreFailure};
use crate::sanitize::sanitize;
use crate::storage::{Storage, USERS_KEY};
use crate::user::{Role, UserDirectory, UserRecord};

/// Validated, self-healing view over the persisted user directory.
///
/// Storage failures never escape: reads degrade to an empty directory and
/// writes are dropped after being logged.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use identity_store::{MemoryStorage, RecordStore, Role};
///
/// let store = RecordStore::new(Arc::new(MemoryStorage::new()));
/// store.create("W@W.com", Role::Worker, "Wanda").expect("new account");
///
/// assert!(store.exists("w@w.com"));
/// assert_eq!(store.get(" w@w.com").map(|record| record.role()), Some(Role::Worker));
/// ```
#[derive(Debug)]
pub struct RecordStore<S: ?Sized> {
    storage: Arc<S>,
}

impl<S: ?Sized> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: ?Sized> RecordStore<S> {
    /// Create a store over a shared storage handle.
    #[must_use]
    pub const fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl<S> RecordStore<S>
where
    S: Storage + ?Sized,
{
    /// Read and sanitise the persisted directory.
    ///
    /// Absent, unreadable or unparsable data yields an empty directory.
    #[must_use]
    pub fn load(&self) -> UserDirectory {
        self.try_load().unwrap_or_else(|failure| {
            warn!(error = %failure, key = USERS_KEY, "using an empty user directory");
            UserDirectory::default()
        })
    }

    /// Sanitise `directory` again and persist it.
    ///
    /// A failed write is logged; the caller's in-memory directory stays
    /// usable but nothing is persisted.
    pub fn save(&self, directory: &UserDirectory) {
        if let Err(failure) = self.try_save(directory) {
            warn!(error = %failure, key = USERS_KEY, "user directory not persisted");
        }
    }

    /// Report whether an account exists for `email`.
    #[must_use]
    pub fn exists(&self, email: &str) -> bool {
        self.get(email).is_some()
    }

    /// Fetch the record for `email`, normalising it first.
    #[must_use]
    pub fn get(&self, email: &str) -> Option<UserRecord> {
        let key = Email::parse(email).ok()?;
        self.load().get(&key).cloned()
    }

    /// Register a new account.
    ///
    /// The check-then-insert is not atomic with respect to other writers
    /// sharing the storage; the last save wins.
    ///
    /// # Errors
    ///
    /// Returns [`CreateUserError::InvalidEmail`] for malformed addresses and
    /// [`CreateUserError::AlreadyExists`] when the normalised email is
    /// already registered. Storage failures are not errors.
    pub fn create(
        &self,
        email: &str,
        role: Role,
        name: &str,
    ) -> Result<UserRecord, CreateUserError> {
        let key = Email::parse(email).map_err(|_| CreateUserError::InvalidEmail)?;
        let mut directory = self.load();
        if directory.contains(&key) {
            return Err(CreateUserError::AlreadyExists { email: key });
        }

        let record = UserRecord::new(role, name);
        directory.insert(key, record.clone());
        self.save(&directory);
        info!(%role, users = directory.len(), "user account created");
        Ok(record)
    }

    fn try_load(&self) -> Result<UserDirectory, StoreFailure> {
        let Some(raw) = self.storage.get_item(USERS_KEY)? else {
            return Ok(UserDirectory::default());
        };
        let value: Value =
            serde_json::from_str(&raw).map_err(StoreFailure::MalformedPersistedData)?;
        Ok(sanitize(&value))
    }

    fn try_save(&self, directory: &UserDirectory) -> Result<(), StoreFailure> {
        let value = serde_json::to_value(directory).map_err(StoreFailure::Encoding)?;
        let clean = sanitize(&value);
        let encoded = serde_json::to_string(&clean).map_err(StoreFailure::Encoding)?;
        self.storage.set_item(USERS_KEY, &encoded)?;
        Ok(())
    }
}

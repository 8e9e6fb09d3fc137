//! Error types for the identity store.
//!
//! Only [`CreateUserError`] ever reaches callers. Storage and parsing
//! failures are captured as [`StoreFailure`], logged, and replaced with a
//! safe default inside the record store and session manager.

use thiserror::Error;

use crate::email::Email;
use crate::storage::StorageError;

/// Errors surfaced by [`crate::RecordStore::create`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateUserError {
    /// The supplied email does not normalise into a well-formed address.
    #[error("email address is not well formed")]
    InvalidEmail,
    /// A user with the same normalised email already exists.
    #[error("an account already exists for {email}")]
    AlreadyExists {
        /// Normalised email that collided.
        email: Email,
    },
}

/// Failures absorbed inside the store; never returned from public APIs.
#[derive(Debug, Error)]
pub(crate) enum StoreFailure {
    /// Persistence could not be read or written.
    #[error("storage access failed: {0}")]
    StorageUnavailable(#[from] StorageError),
    /// Persisted bytes were not valid JSON.
    #[error("persisted data is malformed: {0}")]
    MalformedPersistedData(#[source] serde_json::Error),
    /// The in-memory directory could not be encoded.
    #[error("directory could not be encoded: {0}")]
    Encoding(#[source] serde_json::Error),
}

//! Key/value storage port and its adapters.
//!
//! The record store and session manager persist through [`Storage`], a
//! browser-storage-shaped seam with string keys and string values. Every
//! operation is fallible; callers decide how to degrade. Adapters:
//!
//! - [`MemoryStorage`]: volatile map with switchable failures and an
//!   optional quota.
//! - [`DirStorage`]: one file per key inside a capability-scoped directory.

mod dir;
mod macros;
mod memory;

pub use dir::DirStorage;
pub use memory::MemoryStorage;

use macros::define_port_error;

/// Key holding the JSON-encoded user directory.
pub const USERS_KEY: &str = "users";

/// Key holding the normalised email of the active session.
pub const CURRENT_USER_KEY: &str = "currentUser";

define_port_error! {
    /// Errors raised by [`Storage`] adapters.
    pub enum StorageError {
        /// Storage is disabled or cannot be reached at all.
        Unavailable {
            /// Adapter-specific description.
            message: String,
        } => "storage unavailable: {message}",
        /// Reading a key failed.
        Read {
            /// Key being read.
            key: String,
            /// Adapter-specific description.
            message: String,
        } => "failed to read '{key}': {message}",
        /// Writing or removing a key failed.
        Write {
            /// Key being written.
            key: String,
            /// Adapter-specific description.
            message: String,
        } => "failed to write '{key}': {message}",
        /// The write would exceed the adapter's capacity.
        QuotaExceeded {
            /// Key being written.
            key: String,
            /// Capacity in bytes.
            limit: usize,
        } => "writing '{key}' exceeds the {limit} byte storage quota",
        /// The key cannot be represented by the adapter.
        InvalidKey {
            /// Rejected key.
            key: String,
        } => "storage key '{key}' is not supported",
    }
}

/// Port for string key/value persistence.
///
/// Implementations must never panic; every failure is reported as a
/// [`StorageError`].
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the adapter cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be persisted.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the removal cannot be persisted.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

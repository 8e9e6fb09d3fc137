//! Client-side identity for the two-role marketplace demo.
//!
//! This crate owns the persisted user directory and the "current user"
//! pointer. Everything it reads from storage is treated as untrusted and
//! re-validated, and storage failures degrade to safe defaults instead of
//! propagating.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`RecordStore`]: sanitised load, save, lookup and signup over the
//!   `users` key
//! - [`SessionManager`]: login, logout and resolution of the `currentUser`
//!   key against the directory
//! - [`sanitize`]: the pure schema step turning arbitrary JSON into a
//!   [`UserDirectory`]
//! - [`Storage`]: the key/value port, with [`MemoryStorage`] and
//!   [`DirStorage`] adapters
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use identity_store::{MemoryStorage, RecordStore, Role, SessionManager};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let store = RecordStore::new(Arc::clone(&storage));
//! let session = SessionManager::new(storage);
//!
//! store.create("Sam@Jobs.io", Role::Worker, "Sam").expect("new account");
//! session.login("sam@jobs.io");
//!
//! let user = session.resolve(&store).expect("session resolves");
//! assert_eq!(user.role(), Role::Worker);
//!
//! session.logout();
//! assert!(session.resolve(&store).is_none());
//! ```

mod atomic_io;
mod email;
mod error;
mod record_store;
mod sanitize;
mod session;
pub mod storage;
mod user;

pub use email::{Email, InvalidEmail, is_valid_email, normalize_email};
pub use error::CreateUserError;
pub use record_store::RecordStore;
pub use sanitize::{EntryRejection, sanitize, sanitize_entry};
pub use session::{SessionManager, SessionState};
pub use storage::{
    CURRENT_USER_KEY, DirStorage, MemoryStorage, Storage, StorageError, USERS_KEY,
};
pub use user::{Role, RoleParseError, UserDirectory, UserRecord};

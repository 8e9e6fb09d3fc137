//! Volatile in-process storage with switchable failure modes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{Storage, StorageError};

/// In-memory [`Storage`] adapter.
///
/// Used by tests and as the fallback when durable storage cannot be
/// opened. Reads and writes can be made to fail on demand, and an optional
/// quota caps the total bytes of keys plus values, mirroring a full or
/// disabled browser store.
///
/// # Examples
/// ```
/// use identity_store::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("currentUser", "a@b.com").expect("write succeeds");
/// storage.set_fail_writes(true);
/// assert!(storage.set_item("currentUser", "c@d.com").is_err());
/// assert_eq!(
///     storage.get_item("currentUser").expect("read succeeds").as_deref(),
///     Some("a@b.com"),
/// );
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent write and removal fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn items(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::write(key, "writes are disabled"));
        }
        Ok(())
    }

    fn check_quota(
        &self,
        items: &HashMap<String, String>,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        let Some(limit) = self.quota else {
            return Ok(());
        };
        let others: usize = items
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| existing.len() + stored.len())
            .sum();
        if others + key.len() + value.len() > limit {
            return Err(StorageError::quota_exceeded(key, limit));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StorageError::read(key, "reads are disabled"));
        }
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        let mut items = self.items()?;
        self.check_quota(&items, key, value)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.items()?.remove(key);
        Ok(())
    }
}

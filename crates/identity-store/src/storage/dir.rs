//! Directory-backed storage: one UTF-8 file per key.

use std::io;
use std::path::Path;

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::{Storage, StorageError};
use crate::atomic_io::write_atomic;

/// [`Storage`] adapter persisting each key as a file in one directory.
///
/// All access goes through a capability handle, so keys can never escape
/// the directory. Only keys that form a single plain path component are
/// accepted.
#[derive(Debug)]
pub struct DirStorage {
    dir: Dir,
}

impl DirStorage {
    /// Open `path`, creating it (and any parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the directory cannot be
    /// created or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let target = path.as_ref();
        let unavailable = |err: io::Error| {
            StorageError::unavailable(format!("{}: {err}", target.display()))
        };
        Dir::create_ambient_dir_all(target, ambient_authority()).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(target, ambient_authority()).map_err(unavailable)?;
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory handle.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn file_name(key: &str) -> Result<&str, StorageError> {
    let mut components = Utf8Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if !name.starts_with('.') => Ok(name),
        _ => Err(StorageError::invalid_key(key)),
    }
}

impl Storage for DirStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let name = file_name(key)?;
        match self.dir.read_to_string(name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::read(key, err.to_string())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let name = file_name(key)?;
        write_atomic(&self.dir, name, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let name = file_name(key)?;
        match self.dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::write(key, err.to_string())),
        }
    }
}

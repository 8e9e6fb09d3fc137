//! Crash-safe replacement of single files inside a capability directory.
//!
//! Values are written to a hidden sibling file, synced, and renamed over the
//! target so readers observe either the old value or the new one.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

use crate::storage::StorageError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must already be a single path component; callers validate
/// it before reaching this point.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if the temporary file cannot be written
/// or renamed into place.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> Result<(), StorageError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id());

    if let Err(err) = write_temp_file(dir, &tmp_name, contents) {
        discard_temp_file(dir, &tmp_name);
        return Err(StorageError::write(file_name, err.to_string()));
    }
    if let Err(err) = replace_target(dir, &tmp_name, file_name) {
        discard_temp_file(dir, &tmp_name);
        return Err(StorageError::write(file_name, err.to_string()));
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Rename refuses to overwrite on Windows.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn discard_temp_file(dir: &Dir, tmp_name: &str) {
    if let Err(err) = dir.remove_file(tmp_name) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::debug!(error = %err, "failed to remove temporary storage file");
        }
    }
}

fn sync_directory(dir: &Dir) {
    // Best effort; the rename has already landed.
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        tracing::debug!(error = %err, "storage directory sync skipped");
    }
}

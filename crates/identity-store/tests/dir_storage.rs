//! Record store and session behaviour over directory-backed storage.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use std::sync::Arc;

use identity_store::{CURRENT_USER_KEY, DirStorage, RecordStore, Role, SessionManager, Storage};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;
use test_support::{persisted_users, seed_users};

#[fixture]
fn state_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn open(dir: &TempDir) -> Arc<DirStorage> {
    Arc::new(DirStorage::open(dir.path().join("marketplace")).expect("open storage"))
}

#[rstest]
fn accounts_and_sessions_survive_new_handles(state_dir: TempDir) {
    {
        let storage = open(&state_dir);
        RecordStore::new(Arc::clone(&storage))
            .create("Hal@Hire.com", Role::Hirer, "Hal")
            .expect("create account");
        SessionManager::new(storage).login("hal@hire.com");
    }

    let storage = open(&state_dir);
    let store = RecordStore::new(Arc::clone(&storage));
    let session = SessionManager::new(Arc::clone(&storage));

    let user = session.resolve(&store).expect("session resolves");
    assert_eq!(user.role(), Role::Hirer);
    assert_eq!(
        persisted_users(storage.as_ref()),
        Some(json!({ "hal@hire.com": { "role": "hirer", "name": "Hal" } }))
    );
}

#[rstest]
fn keys_map_to_files_named_after_them(state_dir: TempDir) {
    let storage = open(&state_dir);
    SessionManager::new(Arc::clone(&storage)).login("a@b.com");

    let contents = std::fs::read_to_string(
        state_dir.path().join("marketplace").join(CURRENT_USER_KEY),
    )
    .expect("session file exists");
    assert_eq!(contents, "a@b.com");
}

#[rstest]
fn corrupted_users_file_reads_as_empty_and_is_replaced(state_dir: TempDir) {
    let storage = open(&state_dir);
    seed_users(storage.as_ref(), "{\"a@b.com\": {\"role\":");

    let store = RecordStore::new(Arc::clone(&storage));
    assert!(store.load().is_empty());

    store
        .create("w@w.com", Role::Worker, "Wanda")
        .expect("create over corrupted data");
    assert_eq!(
        persisted_users(storage.as_ref()),
        Some(json!({ "w@w.com": { "role": "worker", "name": "Wanda" } }))
    );
}

#[rstest]
fn logout_removes_session_file(state_dir: TempDir) {
    let storage = open(&state_dir);
    let session = SessionManager::new(Arc::clone(&storage));

    session.login("a@b.com");
    session.logout();

    assert_eq!(storage.get_item(CURRENT_USER_KEY).expect("read"), None);
    assert!(
        !state_dir
            .path()
            .join("marketplace")
            .join(CURRENT_USER_KEY)
            .exists()
    );
}

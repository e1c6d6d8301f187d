//! Common test utilities for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;
use todo_list::{Storage, StoreFormat, TaskStore};

/// Create an empty store backed by a line-format file in a fresh temp directory
pub fn get_test_store() -> (TaskStore, TempDir) {
    get_test_store_with_format(StoreFormat::Lines)
}

pub fn get_test_store_with_format(format: StoreFormat) -> (TaskStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(Storage::with_format(store_path(&dir), format));
    (store, dir)
}

/// Path of the store file inside a test directory
pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("tasks.txt")
}

/// Re-open the store file of `store` as a new store
pub fn reopen(store: &TaskStore) -> TaskStore {
    let storage = Storage::with_format(store.storage().file_path(), store.storage().format());
    TaskStore::open(storage).unwrap()
}

pub fn descriptions(store: &TaskStore) -> Vec<String> {
    store.tasks().iter().map(|t| t.description.clone()).collect()
}

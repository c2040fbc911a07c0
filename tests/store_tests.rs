//! Integration tests for the key-value store
//!
//! Covers uniqueness, ordering, idempotent initialization and the
//! silent-absence semantics of update/delete.

use tempfile::TempDir;

use deck::store::{Store, StoreError};

#[test]
fn test_get_on_never_written_pair_is_none() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.get("note", "missing").unwrap(), None);
}

#[test]
fn test_get_returns_most_recent_write() {
    let store = Store::open_in_memory().unwrap();

    store.insert("note", "todo", "buy milk").unwrap();
    assert_eq!(
        store.get("note", "todo").unwrap().as_deref(),
        Some("buy milk")
    );

    store.update("note", "todo", "buy bread").unwrap();
    assert_eq!(
        store.get("note", "todo").unwrap().as_deref(),
        Some("buy bread")
    );
}

#[test]
fn test_duplicate_insert_fails_and_leaves_value_untouched() {
    let store = Store::open_in_memory().unwrap();
    store.insert("note", "todo", "original").unwrap();

    let err = store.insert("note", "todo", "clobbered").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { .. }));
    assert_eq!(
        store.get("note", "todo").unwrap().as_deref(),
        Some("original")
    );
}

#[test]
fn test_update_on_absent_pair_is_silent_noop() {
    let store = Store::open_in_memory().unwrap();
    store.update("note", "ghost", "whatever").unwrap();
    assert_eq!(store.get("note", "ghost").unwrap(), None);
}

#[test]
fn test_delete_on_absent_pair_is_silent_noop() {
    let store = Store::open_in_memory().unwrap();
    store.delete("note", "ghost").unwrap();

    store.insert("note", "real", "x").unwrap();
    store.delete("note", "real").unwrap();
    assert_eq!(store.get("note", "real").unwrap(), None);
}

#[test]
fn test_partition_enumeration_is_sorted_and_scoped() {
    let store = Store::open_in_memory().unwrap();
    store.insert("note", "cherry", "3").unwrap();
    store.insert("note", "apple", "1").unwrap();
    store.insert("note", "banana", "2").unwrap();
    store.insert("other", "zebra", "z").unwrap();

    let records = store.get_partition("note").unwrap();
    let sorts: Vec<&str> = records.iter().map(|r| r.sort.as_str()).collect();
    assert_eq!(sorts, vec!["apple", "banana", "cherry"]);
    assert!(records.iter().all(|r| r.partition == "note"));
}

#[test]
fn test_composite_sort_keys_order_chronologically() {
    let store = Store::open_in_memory().unwrap();
    store
        .insert("schedule_favorite", "2026-02-01_10:30_42", "42")
        .unwrap();
    store
        .insert("schedule_favorite", "2026-01-31_09:00_7", "7")
        .unwrap();
    store
        .insert("schedule_favorite", "2026-01-31_14:00_13", "13")
        .unwrap();

    let records = store.get_partition("schedule_favorite").unwrap();
    let values: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["7", "13", "42"]);
}

#[test]
fn test_initialization_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");

    {
        let store = Store::open(&path).unwrap();
        assert_eq!(store.schema_version().unwrap().as_deref(), Some("1"));
        store.insert("note", "kept", "across reopen").unwrap();
    }

    // reopening must not rewrite the schema record or touch data
    let store = Store::open(&path).unwrap();
    assert_eq!(store.schema_version().unwrap().as_deref(), Some("1"));
    assert_eq!(
        store.get("note", "kept").unwrap().as_deref(),
        Some("across reopen")
    );
}

#[test]
fn test_schema_record_cannot_be_duplicated() {
    let store = Store::open_in_memory().unwrap();
    let err = store.insert("config", "schema", "2").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { .. }));
    assert_eq!(store.schema_version().unwrap().as_deref(), Some("1"));
}

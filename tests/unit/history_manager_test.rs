//! Unit tests for the history store.
//!
//! Covers duplicate suppression, eviction, removal, persistence and
//! recovery from corrupt storage.

use std::sync::Arc;

use qrgen::database::{Database, KeyValueStorage, MemoryStorage};
use qrgen::managers::history_manager::{
    HistoryManager, HistoryManagerTrait, DEFAULT_STORAGE_KEY, HISTORY_CAPACITY,
};
use qrgen::types::payload::PayloadType;

fn manager() -> (Arc<MemoryStorage>, HistoryManager) {
    let storage = Arc::new(MemoryStorage::new());
    let manager = HistoryManager::new(storage.clone(), DEFAULT_STORAGE_KEY);
    (storage, manager)
}

#[test]
fn test_add_inserts_at_front() {
    let (_, mut history) = manager();
    history.add(PayloadType::Url, "https://a.example").unwrap();
    history.add(PayloadType::Text, "second").unwrap();

    let list = history.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].raw_payload, "second");
    assert_eq!(list[0].payload_type, PayloadType::Text);
    assert_eq!(list[1].raw_payload, "https://a.example");
}

#[test]
fn test_add_derives_label_and_thumbnail() {
    let (_, mut history) = manager();
    let entry = history
        .add(PayloadType::Phone, "tel:5551234")
        .unwrap()
        .expect("new payload should be recorded");

    assert_eq!(entry.display_label, "5551234");
    assert!(entry.thumbnail.starts_with("data:image/png;base64,"));
}

#[test]
fn test_duplicate_payload_is_noop() {
    let (_, mut history) = manager();
    history.add(PayloadType::Text, "same").unwrap();
    let before = history.list().to_vec();

    let result = history.add(PayloadType::Text, "same").unwrap();
    assert!(result.is_none());
    assert_eq!(history.list(), before.as_slice());
}

#[test]
fn test_duplicate_check_ignores_type() {
    let (_, mut history) = manager();
    history.add(PayloadType::Url, "https://x.example").unwrap();
    let result = history.add(PayloadType::Text, "https://x.example").unwrap();
    assert!(result.is_none());
    assert_eq!(history.len(), 1);
}

#[test]
fn test_eleventh_entry_evicts_oldest() {
    let (_, mut history) = manager();
    for i in 0..=HISTORY_CAPACITY {
        history.add(PayloadType::Text, &format!("payload {}", i)).unwrap();
    }

    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.list()[0].raw_payload, format!("payload {}", HISTORY_CAPACITY));
    assert!(history.list().iter().all(|e| e.raw_payload != "payload 0"));
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let (_, mut history) = manager();
    for i in 0..5 {
        history.add(PayloadType::Text, &format!("p{}", i)).unwrap();
    }
    let ids: Vec<i64> = history.list().iter().map(|e| e.id).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] > pair[1], "newer entries must have larger ids: {:?}", ids);
    }
}

#[test]
fn test_remove_deletes_entry() {
    let (_, mut history) = manager();
    let keep = history.add(PayloadType::Text, "keep").unwrap().unwrap();
    let drop = history.add(PayloadType::Text, "drop").unwrap().unwrap();

    history.remove(drop.id).unwrap();
    assert_eq!(history.len(), 1);
    assert!(history.get(drop.id).is_none());
    assert!(history.get(keep.id).is_some());
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let (storage, mut history) = manager();
    history.add(PayloadType::Text, "only").unwrap();
    let persisted = storage.get_item(DEFAULT_STORAGE_KEY).unwrap();

    history.remove(42).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), persisted);
}

#[test]
fn test_mutations_are_persisted() {
    let (storage, mut history) = manager();
    let entry = history.add(PayloadType::Text, "persist me").unwrap().unwrap();

    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["data"], "persist me");
    assert_eq!(json[0]["type"], "text");
    assert_eq!(json[0]["displayData"], "persist me");
    assert_eq!(json[0]["id"], entry.id);
    assert!(json[0]["timestamp"].is_string());

    history.remove(entry.id).unwrap();
    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn test_load_restores_persisted_entries() {
    let (storage, mut history) = manager();
    history.add(PayloadType::Url, "https://one.example").unwrap();
    history.add(PayloadType::Sms, "sms:555?body=hi").unwrap();

    let mut restored = HistoryManager::new(storage, DEFAULT_STORAGE_KEY);
    restored.load();
    assert_eq!(restored.list(), history.list());
}

#[test]
fn test_load_with_nothing_persisted_is_empty() {
    let (_, mut history) = manager();
    history.load();
    assert!(history.is_empty());
}

#[test]
fn test_load_corrupt_data_yields_empty_history() {
    let (storage, mut history) = manager();
    storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    history.load();
    assert!(history.is_empty());

    // The store stays usable afterwards.
    history.add(PayloadType::Text, "fresh").unwrap();
    assert_eq!(history.len(), 1);
}

#[test]
fn test_load_dedups_and_truncates() {
    let (storage, mut history) = manager();
    let mut entries = Vec::new();
    for i in 0..12 {
        let data = if i < 2 { "dup".to_string() } else { format!("p{}", i) };
        entries.push(serde_json::json!({
            "id": 1000 - i,
            "type": "text",
            "data": data,
            "displayData": "x",
            "thumbnail": "",
            "timestamp": "2024-01-01T00:00:00Z",
        }));
    }
    storage
        .set_item(DEFAULT_STORAGE_KEY, &serde_json::to_string(&entries).unwrap())
        .unwrap();

    history.load();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.list()[0].id, 1000);
    assert_eq!(
        history.list().iter().filter(|e| e.raw_payload == "dup").count(),
        1
    );
}

#[test]
fn test_custom_storage_key() {
    let storage = Arc::new(MemoryStorage::new());
    let mut history = HistoryManager::new(storage.clone(), "custom-key");
    history.add(PayloadType::Text, "hello").unwrap();

    assert_eq!(history.storage_key(), "custom-key");
    assert!(storage.get_item("custom-key").unwrap().is_some());
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_history_survives_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrgen.db");

    let first_id = {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut history = HistoryManager::new(db, DEFAULT_STORAGE_KEY);
        history.add(PayloadType::Text, "durable").unwrap().unwrap().id
    };

    let db = Arc::new(Database::open(&path).unwrap());
    let mut history = HistoryManager::new(db, DEFAULT_STORAGE_KEY);
    history.load();
    assert_eq!(history.len(), 1);
    assert_eq!(history.list()[0].id, first_id);
}

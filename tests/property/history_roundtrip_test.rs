//! Property-based tests for history persistence.
//!
//! Whatever the store holds in memory is exactly what a fresh store reads
//! back from the same storage slot.

use std::sync::Arc;

use proptest::prelude::*;
use qrgen::database::{Database, KeyValueStorage};
use qrgen::managers::history_manager::{HistoryManager, HistoryManagerTrait, DEFAULT_STORAGE_KEY};
use qrgen::types::payload::PayloadType;

fn arb_type() -> impl Strategy<Value = PayloadType> {
    proptest::sample::select(PayloadType::ALL.to_vec())
}

// **Persist then load**
//
// *For any* set of generated payloads, reloading from storage yields an
// identical list, including ids, labels, thumbnails and timestamps.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn history_roundtrips_through_database(
        items in proptest::collection::vec((arb_type(), "[ -~]{1,60}"), 1..14),
    ) {
        let db = Arc::new(Database::open_in_memory().expect("in-memory database"));
        let mut history = HistoryManager::new(db.clone(), DEFAULT_STORAGE_KEY);
        for (payload_type, payload) in &items {
            history.add(*payload_type, payload).unwrap();
        }

        let mut restored = HistoryManager::new(db.clone(), DEFAULT_STORAGE_KEY);
        restored.load();
        prop_assert_eq!(restored.list(), history.list());

        // Re-persisting the restored list writes the same document.
        let before = db.get_item(DEFAULT_STORAGE_KEY).unwrap();
        restored.persist().unwrap();
        prop_assert_eq!(db.get_item(DEFAULT_STORAGE_KEY).unwrap(), before);
    }
}

//! Property-based tests for history store operations.
//!
//! For any sequence of generations the store stays bounded, free of
//! duplicate payloads and ordered most-recent-first.

use std::sync::Arc;

use proptest::prelude::*;
use qrgen::database::MemoryStorage;
use qrgen::managers::history_manager::{HistoryManager, HistoryManagerTrait, HISTORY_CAPACITY};
use qrgen::types::payload::PayloadType;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    RemoveAt(usize),
}

/// Small payload alphabet so duplicates occur often.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[a-e]{1,2}".prop_map(Op::Add),
        1 => (0usize..12).prop_map(Op::RemoveAt),
    ]
}

fn fresh() -> HistoryManager {
    HistoryManager::new(Arc::new(MemoryStorage::new()), "qrgen-history")
}

// **Bounded, unique, newest first**
//
// *For any* sequence of adds and removes, the history never exceeds its
// capacity, holds each payload at most once and keeps ids strictly
// descending from front to back.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn history_invariants_hold(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let mut history = fresh();
        for op in ops {
            match op {
                Op::Add(payload) => {
                    let existed = history.list().iter().any(|e| e.raw_payload == payload);
                    let added = history.add(PayloadType::Text, &payload).unwrap();
                    prop_assert_eq!(added.is_some(), !existed);
                    // A duplicate keeps its slot; only new payloads go to the front.
                    if !existed {
                        prop_assert_eq!(&history.list()[0].raw_payload, &payload);
                    }
                }
                Op::RemoveAt(index) => {
                    if let Some(id) = history.list().get(index).map(|e| e.id) {
                        history.remove(id).unwrap();
                        prop_assert!(history.get(id).is_none());
                    }
                }
            }

            let list = history.list();
            prop_assert!(list.len() <= HISTORY_CAPACITY);
            let mut payloads: Vec<&str> = list.iter().map(|e| e.raw_payload.as_str()).collect();
            payloads.sort_unstable();
            payloads.dedup();
            prop_assert_eq!(payloads.len(), list.len());
            for pair in list.windows(2) {
                prop_assert!(pair[0].id > pair[1].id);
            }
        }
    }
}

// **Eviction order**
//
// *For any* number of distinct payloads past capacity, the survivors are
// exactly the most recent ones.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn eviction_keeps_most_recent(count in (HISTORY_CAPACITY + 1)..(HISTORY_CAPACITY * 2)) {
        let mut history = fresh();
        for i in 0..count {
            history.add(PayloadType::Text, &format!("payload-{}", i)).unwrap();
        }

        let expected: Vec<String> = (count - HISTORY_CAPACITY..count)
            .rev()
            .map(|i| format!("payload-{}", i))
            .collect();
        let actual: Vec<String> = history.list().iter().map(|e| e.raw_payload.clone()).collect();
        prop_assert_eq!(actual, expected);
    }
}

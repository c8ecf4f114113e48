//! Index invariants under random add/update/remove sequences.

use super::common::*;
use kbsearch::contracts::verify;
use kbsearch::{Document, SearchEngine};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f]{1,4}").unwrap()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..8).prop_map(|words| words.join(" "))
}

fn doc_strategy() -> impl Strategy<Value = Document> {
    (0u8..8, text_strategy(), text_strategy(), prop::collection::vec(word_strategy(), 0..3))
        .prop_map(|(id, title, body, tags)| make_doc(&format!("d{}", id), &title, &body).with_tags(tags))
}

#[derive(Debug, Clone)]
enum Op {
    Add(Document),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => doc_strategy().prop_map(Op::Add),
        1 => (0u8..8).prop_map(Op::Remove),
    ]
}

fn apply(engine: &mut SearchEngine, op: Op) {
    match op {
        Op::Add(doc) => engine.add_document(doc).unwrap(),
        Op::Remove(id) => {
            engine.remove_document(&format!("d{}", id));
        }
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Postings, registry and per-document term lists agree after any history.
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut engine = SearchEngine::new();
        for op in ops {
            apply(&mut engine, op);
        }
        prop_assert_eq!(verify(engine.index()), Ok(()));
    }

    /// Adding then removing a fresh document restores the stats exactly.
    #[test]
    fn prop_add_remove_round_trip(
        ops in prop::collection::vec(op_strategy(), 0..20),
        body in text_strategy(),
    ) {
        let mut engine = SearchEngine::new();
        for op in ops {
            apply(&mut engine, op);
        }
        let before = engine.stats();

        engine.add_document(make_doc("fresh", "", &format!("{} uniqueword", body))).unwrap();
        prop_assert!(!engine.search("uniqueword").is_empty());
        engine.remove_document("fresh");

        prop_assert!(engine.search("uniqueword").is_empty());
        prop_assert_eq!(engine.stats(), before);
    }

    /// Updating with the same document twice changes nothing the second time.
    #[test]
    fn prop_update_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..20),
        doc in doc_strategy(),
    ) {
        let mut engine = SearchEngine::new();
        for op in ops {
            apply(&mut engine, op);
        }
        engine.update_document(doc.clone()).unwrap();
        let once = engine.stats();
        engine.update_document(doc).unwrap();
        prop_assert_eq!(engine.stats(), once);
    }

    /// No posting list references a removed document.
    #[test]
    fn prop_no_postings_leak(docs in prop::collection::vec(doc_strategy(), 1..12), victim in 0u8..8) {
        let mut engine = SearchEngine::new();
        for doc in docs {
            engine.add_document(doc).unwrap();
        }
        let id = format!("d{}", victim);
        let slot = engine.index().slot_of(&id);
        engine.remove_document(&id);

        if let Some(slot) = slot {
            let leaked = engine
                .index()
                .inverted()
                .terms()
                .any(|(_, list)| list.contains(&slot));
            prop_assert!(!leaked);
        }
        prop_assert!(!engine.contains(&id));
    }

    /// Batch indexing ends in the same state as adding one at a time.
    #[test]
    fn prop_batch_matches_sequential(docs in prop::collection::vec(doc_strategy(), 0..16)) {
        let mut one_by_one = SearchEngine::new();
        for doc in docs.clone() {
            one_by_one.add_document(doc).unwrap();
        }
        let mut batched = SearchEngine::new();
        batched.add_documents(docs).unwrap();

        prop_assert_eq!(one_by_one.stats(), batched.stats());
        prop_assert_eq!(verify(batched.index()), Ok(()));
    }
}

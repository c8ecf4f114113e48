//! Query semantics: what each query form matches.

use super::common::*;
use kbsearch::contracts::verify;
use kbsearch::{SearchOptions, SyntaxError};

#[test]
fn test_scenario_queries() {
    let engine = scenario_engine();

    assert_eq!(ids(&engine.search("deep learning")), vec!["doc1", "doc2"]);
    assert_eq!(ids(&engine.search("\"deep learning\"")), vec!["doc1"]);
    assert_eq!(ids(&engine.search("deep NOT learning")), vec!["doc2"]);
    assert_eq!(sorted_ids(&engine.search("type:page")), vec!["doc1", "doc2"]);
}

#[test]
fn test_terms_and_facets_are_separate() {
    let engine = knowledge_engine();

    assert_eq!(ids(&engine.search("rust")), vec!["p-rust"]);
    assert_eq!(sorted_ids(&engine.search("tag:rust")), vec!["b-borrow", "p-rust"]);
    assert_eq!(sorted_ids(&engine.search("tag:Programming")), vec!["p-go", "p-rust"]);
    assert_eq!(ids(&engine.search("programming")), vec!["t-programming"]);
    assert_eq!(ids(&engine.search("type:block")), vec!["b-borrow"]);
    assert_eq!(ids(&engine.search("type:tag")), vec!["t-programming"]);
}

#[test]
fn test_boolean_combinations() {
    let engine = knowledge_engine();

    assert_eq!(sorted_ids(&engine.search("rust OR go")), vec!["p-go", "p-rust"]);
    assert_eq!(ids(&engine.search("tag:rust AND NOT type:block")), vec!["p-rust"]);
    assert_eq!(ids(&engine.search("(rust OR go) AND concurrency")), vec!["p-go"]);
    assert!(engine.search("rust AND go").is_empty());
    assert!(engine.search("rust NOT rust").is_empty());
}

#[test]
fn test_wildcards_and_phrases() {
    let engine = knowledge_engine();

    assert_eq!(sorted_ids(&engine.search("borrow*")), vec!["b-borrow", "p-rust"]);
    assert_eq!(ids(&engine.search("go?outines")), vec!["p-go"]);
    assert_eq!(sorted_ids(&engine.search("tag:r*")), vec!["b-borrow", "p-rust"]);
    assert_eq!(ids(&engine.search("\"borrowing rules\"")), vec!["p-rust"]);
    assert!(engine.search("\"borrowing bread\"").is_empty());
}

#[test]
fn test_absent_things_are_empty_not_errors() {
    let engine = knowledge_engine();

    let outcome = engine.search_detailed("nonexistent", &SearchOptions::default());
    assert!(outcome.results.is_empty());
    assert!(!outcome.has_error);

    assert!(engine.search("author:ana").is_empty());
    assert!(engine.search("[a TO z]").is_empty());
    assert!(engine.search("").is_empty());
}

#[test]
fn test_syntax_errors_degrade_to_raw_term() {
    let engine = knowledge_engine();

    let outcome = engine.search_detailed("tag:", &SearchOptions::default());
    assert!(outcome.has_error);
    assert!(matches!(
        outcome.errors.as_slice(),
        [SyntaxError::MissingFieldValue { .. }]
    ));
    assert!(outcome.results.is_empty());

    // Recoverable: the tree survives, so the results do too.
    let outcome = engine.search_detailed("(rust OR go", &SearchOptions::default());
    assert!(outcome.has_error);
    assert_eq!(outcome.results.len(), 2);
}

#[test]
fn test_unicode_text() {
    let engine = engine_with(vec![make_doc("u", "Über Straße", "café naïve 東京")]);

    assert_eq!(ids(&engine.search("über")), vec!["u"]);
    assert_eq!(ids(&engine.search("CAFÉ")), vec!["u"]);
    assert_eq!(ids(&engine.search("東京")), vec!["u"]);
}

#[test]
fn test_remove_leaves_no_postings() {
    let mut engine = knowledge_engine();

    assert!(engine.remove_document("p-rust"));
    assert!(engine.search("ownership").is_empty());
    assert_eq!(ids(&engine.search("tag:rust")), vec!["b-borrow"]);

    let slot_free = engine
        .index()
        .inverted()
        .terms()
        .all(|(_, list)| list.iter().all(|slot| engine.index().entry(*slot).is_some()));
    assert!(slot_free);
    assert_eq!(verify(engine.index()), Ok(()));

    // Removing again is a no-op.
    assert!(!engine.remove_document("p-rust"));
}

#[test]
fn test_very_long_query() {
    let engine = scenario_engine();

    let words = vec!["deep"; 50_000].join(" ");
    let outcome = engine.search_detailed(&words, &SearchOptions::default());
    assert!(!outcome.has_error);
    assert_eq!(sorted_ids(&outcome.results), vec!["doc1", "doc2"]);

    let chained = vec!["learning"; 50_000].join(" OR ");
    assert_eq!(ids(&engine.search(&chained)), vec!["doc1"]);
}

#[test]
fn test_deeply_nested_groups() {
    let engine = scenario_engine();

    let raw = format!("{}deep", "(".repeat(10_000));
    let outcome = engine.search_detailed(&raw, &SearchOptions::default());
    assert!(outcome.has_error);
    assert!(matches!(
        outcome.errors.last(),
        Some(SyntaxError::NestingTooDeep { .. })
    ));
    assert!(outcome.results.is_empty());
}

#[test]
fn test_custom_fields_are_stored_not_indexed() {
    let doc = make_doc("c", "Sprint notes", "retro summary")
        .with_field("priority", serde_json::json!("urgent"))
        .with_field("estimate", serde_json::json!(3));
    let engine = engine_with(vec![doc]);

    assert!(engine.search("urgent").is_empty());
    assert!(engine.search("priority:urgent").is_empty());

    let results = engine.search("retro");
    assert_eq!(results[0].document.fields["priority"], "urgent");
    assert_eq!(results[0].document.fields["estimate"], 3);
}

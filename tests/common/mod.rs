//! Shared test utilities and fixtures.

#![allow(dead_code)]

use kbsearch::{Document, DocumentKind, QueryResult, SearchEngine};

// Re-export canonical test utilities from kbsearch::testing
pub use kbsearch::testing::{fixed_time, make_doc, scenario_docs};

// ============================================================================
// ENGINES
// ============================================================================

/// Engine holding the two-document ranking scenario.
pub fn scenario_engine() -> SearchEngine {
    engine_with(scenario_docs())
}

pub fn engine_with(docs: Vec<Document>) -> SearchEngine {
    let mut engine = SearchEngine::new();
    engine.add_documents(docs).expect("fixture ids are valid");
    engine
}

/// A small knowledge base with every document kind, tags, authors and paths.
pub fn knowledge_base() -> Vec<Document> {
    vec![
        make_doc("p-rust", "Rust Ownership", "ownership and borrowing rules in rust")
            .with_tags(["rust", "Programming"])
            .with_author("ana")
            .with_path("notes/lang/rust.md")
            .with_timestamps(fixed_time(10), fixed_time(40)),
        make_doc("p-go", "Go Concurrency", "goroutines and channels make concurrency simple")
            .with_tags(["go", "programming"])
            .with_author("ben")
            .with_path("notes/lang/go.md")
            .with_timestamps(fixed_time(20), fixed_time(30)),
        make_doc("b-borrow", "", "the borrow checker rejects dangling references")
            .with_kind(DocumentKind::Block)
            .with_tags(["rust"])
            .with_author("ana")
            .with_path("notes/lang/rust.md")
            .with_timestamps(fixed_time(11), fixed_time(11)),
        make_doc("t-programming", "programming", "")
            .with_kind(DocumentKind::Tag)
            .with_timestamps(fixed_time(1), fixed_time(50)),
        make_doc("p-bread", "Sourdough Bread", "flour water salt and a lively starter")
            .with_tags(["cooking"])
            .with_author("cleo")
            .with_path("journal/2024/bread.md")
            .with_timestamps(fixed_time(30), fixed_time(35)),
    ]
}

pub fn knowledge_engine() -> SearchEngine {
    engine_with(knowledge_base())
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

pub fn ids(results: &[QueryResult<'_>]) -> Vec<String> {
    results.iter().map(|r| r.document.id.clone()).collect()
}

pub fn sorted_ids(results: &[QueryResult<'_>]) -> Vec<String> {
    let mut ids = ids(results);
    ids.sort();
    ids
}

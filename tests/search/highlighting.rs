//! Highlight fragments and matched fields on search results.

use super::common::*;
use kbsearch::{MatchField, SearchOptions};
use std::collections::BTreeSet;

fn untagged(fragment: &str, options: &SearchOptions) -> String {
    fragment
        .replace(&options.highlight_tags.pre, "")
        .replace(&options.highlight_tags.post, "")
}

#[test]
fn test_title_and_body_fragments() {
    let engine = knowledge_engine();
    let results = engine.search("rust");
    let hit = &results[0];

    assert_eq!(hit.highlights.len(), 2);
    assert_eq!(hit.highlights[0].field, MatchField::Title);
    assert_eq!(hit.highlights[0].fragments, vec!["<mark>Rust</mark> Ownership"]);
    assert_eq!(hit.highlights[0].original, "Rust Ownership");
    assert_eq!(hit.highlights[1].field, MatchField::Body);
    assert_eq!(
        hit.highlights[1].fragments,
        vec!["ownership and borrowing rules in <mark>rust</mark>"]
    );
}

#[test]
fn test_field_without_fragments_is_omitted() {
    let engine = knowledge_engine();
    let results = engine.search("goroutines");
    assert_eq!(results[0].highlights.len(), 1);
    assert_eq!(results[0].highlights[0].field, MatchField::Body);
}

#[test]
fn test_long_body_is_windowed() {
    let body = format!("{} needle {}", "lorem ".repeat(40), "ipsum ".repeat(40));
    let engine = engine_with(vec![make_doc("long", "", &body)]);
    let mut options = SearchOptions::default();
    options.fragment_size = 30;

    let results = engine.search_with("needle", &options);
    let fragment = &results[0].highlights[0].fragments[0];
    assert!(fragment.starts_with("..."));
    assert!(fragment.ends_with("..."));
    assert!(fragment.contains("<mark>needle</mark>"));
    assert!(untagged(fragment, &options).chars().count() <= options.fragment_size + 6);
}

#[test]
fn test_max_fragments_caps_each_field() {
    let body = vec!["echo filler filler filler"; 10].join(" ");
    let engine = engine_with(vec![make_doc("e", "echo echo", &body)]);
    let mut options = SearchOptions::default();
    options.fragment_size = 10;
    options.max_fragments = 2;

    let results = engine.search_with("echo", &options);
    for highlight in &results[0].highlights {
        assert!(highlight.fragments.len() <= 2);
        for fragment in &highlight.fragments {
            assert!(untagged(fragment, &options).chars().count() <= 16);
        }
    }
    assert_eq!(results[0].highlights[1].fragments.len(), 2);
}

#[test]
fn test_custom_tags_and_disabled_highlighting() {
    let engine = knowledge_engine();
    let options: SearchOptions = serde_json::from_str(
        r#"{"highlightTags": {"pre": "**", "post": "**"}}"#,
    )
    .unwrap();
    let results = engine.search_with("sourdough", &options);
    assert_eq!(results[0].highlights[0].fragments, vec!["**Sourdough** Bread"]);

    let off = SearchOptions::default().with_highlight(false);
    assert!(engine.search_with("sourdough", &off)[0].highlights.is_empty());
}

#[test]
fn test_matched_fields() {
    let engine = knowledge_engine();
    let results = engine.search("tag:rust");

    let by_id = |id: &str| {
        results
            .iter()
            .find(|r| r.document.id == id)
            .map(|r| r.matched_fields.clone())
            .unwrap_or_default()
    };
    assert_eq!(
        by_id("p-rust"),
        BTreeSet::from([MatchField::Title, MatchField::Body, MatchField::Tags])
    );
    assert_eq!(by_id("b-borrow"), BTreeSet::from([MatchField::Tags]));
}

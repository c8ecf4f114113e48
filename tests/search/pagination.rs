//! Limit/offset slicing of the sorted result list.

use super::common::*;
use kbsearch::{Document, SearchOptions, SortBy, SortOrder};

fn corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            let body = format!("common {}", "word ".repeat(i % 7 + 1));
            make_doc(&format!("d{:02}", i), &format!("Title {:02}", i), &body)
        })
        .collect()
}

#[test]
fn test_pages_are_slices_of_the_full_list() {
    let engine = engine_with(corpus(30));
    let full = ids(&engine.search_with("common", &SearchOptions::default().with_limit(30)));
    assert_eq!(full.len(), 30);

    for (offset, limit) in [(0, 5), (5, 5), (28, 5), (10, 0), (30, 3), (45, 1)] {
        let options = SearchOptions::default().with_offset(offset).with_limit(limit);
        let page = ids(&engine.search_with("common", &options));
        let start = offset.min(full.len());
        let end = (offset + limit).min(full.len());
        assert_eq!(page, full[start..end].to_vec(), "offset {} limit {}", offset, limit);
    }
}

#[test]
fn test_default_limit_is_fifty() {
    let engine = engine_with(corpus(60));
    assert_eq!(engine.search("common").len(), 50);

    let outcome = engine.search_detailed("common", &SearchOptions::default());
    assert_eq!(outcome.total_matches, 60);
}

#[test]
fn test_sorted_pages() {
    let engine = engine_with(corpus(12));
    let options = SearchOptions::default()
        .with_sort(SortBy::Title, SortOrder::Asc)
        .with_offset(10)
        .with_limit(5);
    assert_eq!(ids(&engine.search_with("common", &options)), vec!["d10", "d11"]);
}

//! Ranking: TF-IDF scores, the title boost, and explicit sort orders.

use super::common::*;
use kbsearch::{SearchOptions, SortBy, SortOrder};

fn score_of(engine: &kbsearch::SearchEngine, query: &str, id: &str) -> f64 {
    engine
        .search(query)
        .iter()
        .find(|r| r.document.id == id)
        .map(|r| r.score)
        .expect("document should match")
}

#[test]
fn test_scenario_scores_exactly() {
    let engine = scenario_engine();
    let results = engine.search("deep learning");

    // doc1: 8 tokens, "deep" in every doc (idf 0), "learning" twice; both in title.
    let expected = (2.0 / 8.0) * 2f64.ln() * 1.5 * 1.5;
    assert!((results[0].score - expected).abs() < 1e-12);
    assert_eq!(results[1].score, 0.0);
}

#[test]
fn test_more_occurrences_score_higher() {
    let engine = engine_with(vec![
        make_doc("many", "", "apple apple pear pear"),
        make_doc("one", "", "apple pear kiwi plum"),
        make_doc("none", "", "fig"),
    ]);
    assert!(score_of(&engine, "apple", "many") >= score_of(&engine, "apple", "one"));
}

#[test]
fn test_title_match_scores_strictly_higher() {
    let engine = engine_with(vec![
        make_doc("titled", "Apple notes", "apple pie"),
        make_doc("plain", "Plain notes", "apple pie"),
        make_doc("other", "", "bread"),
    ]);
    assert!(score_of(&engine, "apple", "titled") > score_of(&engine, "apple", "plain"));
    assert_eq!(ids(&engine.search("apple")), vec!["titled", "plain"]);
}

#[test]
fn test_sort_by_title() {
    let engine = knowledge_engine();
    let asc = SearchOptions::default().with_sort(SortBy::Title, SortOrder::Asc);
    assert_eq!(
        ids(&engine.search_with("NOT zzz", &asc)),
        vec!["b-borrow", "p-go", "t-programming", "p-rust", "p-bread"]
    );

    let desc = SearchOptions::default().with_sort(SortBy::Title, SortOrder::Desc);
    assert_eq!(
        ids(&engine.search_with("NOT zzz", &desc)),
        vec!["p-bread", "p-rust", "t-programming", "p-go", "b-borrow"]
    );
}

#[test]
fn test_sort_by_timestamps() {
    let engine = knowledge_engine();

    let created = SearchOptions::default().with_sort(SortBy::CreatedAt, SortOrder::Desc);
    assert_eq!(
        ids(&engine.search_with("NOT zzz", &created)),
        vec!["p-bread", "p-go", "b-borrow", "p-rust", "t-programming"]
    );

    let updated = SearchOptions::default().with_sort(SortBy::UpdatedAt, SortOrder::Asc);
    assert_eq!(
        ids(&engine.search_with("NOT zzz", &updated)),
        vec!["b-borrow", "p-go", "p-bread", "p-rust", "t-programming"]
    );
}

#[test]
fn test_unknown_sort_key_ranks_by_score() {
    let engine = scenario_engine();
    let options: SearchOptions =
        serde_json::from_str(r#"{"sortBy": "popularity", "sortOrder": "desc"}"#).unwrap();
    assert_eq!(options.sort_by, SortBy::Score);
    assert_eq!(ids(&engine.search_with("deep learning", &options)), vec!["doc1", "doc2"]);
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for end-to-end search.
//!
//! Arbitrary bytes as a query against a fixed corpus: no panics, results
//! bounded by the limit, scores non-negative, fragments inside their window.

#![no_main]

use kbsearch::{Document, SearchEngine, SearchOptions};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

fn engine() -> &'static SearchEngine {
    static ENGINE: OnceLock<SearchEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let mut engine = SearchEngine::new();
        let docs = [
            ("doc1", "Deep Learning Basics", "deep learning uses neural networks"),
            ("doc2", "Cooking Basics", "deep frying uses hot oil"),
            ("doc3", "Über Café", "naïve straße 東京 emoji 🎉 text"),
            ("doc4", "", "a? b* [x TO y] \"quoted\" (paren) tag:fake"),
        ];
        for (id, title, body) in docs {
            engine
                .add_document(Document::new(id, title, body).with_tags(["fuzz", "Tag"]))
                .expect("fixture ids are valid");
        }
        engine
    })
}

fuzz_target!(|data: &[u8]| {
    let query = String::from_utf8_lossy(data);
    let query: String = query.chars().take(200).collect();

    let mut options = SearchOptions::default().with_limit(3);
    options.fragment_size = 24;
    let outcome = engine().search_detailed(&query, &options);

    // INVARIANT 1: results bounded by limit and total
    assert!(outcome.results.len() <= 3);
    assert!(outcome.results.len() <= outcome.total_matches);

    for result in &outcome.results {
        // INVARIANT 2: scores are finite and non-negative
        assert!(result.score.is_finite() && result.score >= 0.0);

        // INVARIANT 3: fragments respect the window and the cap
        for highlight in &result.highlights {
            assert!(!highlight.fragments.is_empty());
            assert!(highlight.fragments.len() <= options.max_fragments);
            for fragment in &highlight.fragments {
                let plain = fragment.replace("<mark>", "").replace("</mark>", "");
                assert!(plain.chars().count() <= options.fragment_size + 6);
            }
        }
    }
});

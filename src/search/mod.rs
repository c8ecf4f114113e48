// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search pipeline.
//!
//! ```text
//! raw query ──parse──▶ QueryNode ──execute──▶ candidate slots
//!                                                │
//!                                   post-filter (SearchFilters)
//!                                                │
//!             score (bag-of-words TF-IDF + title boost), matched fields
//!                                                │
//!                          sort ──▶ slice [offset, offset + limit)
//!                                                │
//!                                 highlight the page that survived
//! ```
//!
//! Highlighting only reads the document and options, so running it after
//! pagination gives the same page as highlighting everything first.

pub mod executor;
pub mod filter;
pub mod utils;

pub use executor::execute_query;
pub use filter::matches_filters;

use crate::highlight::{matched_fields, Highlighter};
use crate::index::DocumentIndex;
use crate::query::{parse, SyntaxError};
use crate::scoring::ranking::sort_results;
use crate::scoring::score_document;
use crate::types::{QueryResult, SearchOptions};
use serde::Serialize;
use std::time::Instant;
use utils::{paginate, query_terms, unique_terms};

/// One page of results plus what the caller needs to explain it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome<'a> {
    pub results: Vec<QueryResult<'a>>,
    /// Matches after filtering, before pagination.
    pub total_matches: usize,
    pub has_error: bool,
    /// Syntax problems; results then come from the fallback tree.
    pub errors: Vec<SyntaxError>,
}

impl SearchOutcome<'_> {
    fn empty() -> Self {
        SearchOutcome {
            results: Vec::new(),
            total_matches: 0,
            has_error: false,
            errors: Vec::new(),
        }
    }
}

/// Run `query` against `index`.
///
/// A blank query matches nothing and isn't a syntax error.
pub fn search<'a>(index: &'a DocumentIndex, query: &str, options: &SearchOptions) -> SearchOutcome<'a> {
    if query.trim().is_empty() {
        return SearchOutcome::empty();
    }
    let started = Instant::now();

    let parsed = parse(query);
    let candidates = execute_query(index, &parsed.ast);

    let terms = query_terms(query);
    let distinct = unique_terms(&terms);

    let mut results: Vec<QueryResult<'a>> = candidates
        .into_iter()
        .filter_map(|slot| index.entry(slot))
        .filter(|entry| matches_filters(&entry.document, &options.filters))
        .map(|entry| QueryResult {
            document: &entry.document,
            score: score_document(index, entry, &terms),
            highlights: Vec::new(),
            matched_fields: matched_fields(&entry.document, &distinct),
        })
        .collect();
    let total_matches = results.len();

    sort_results(&mut results, options.sort_by, options.sort_order);
    paginate(&mut results, options.offset, options.limit);

    if options.highlight {
        let highlighter = Highlighter::new(&distinct, options);
        for result in &mut results {
            result.highlights = highlighter.highlight(result.document);
        }
    }

    tracing::debug!(
        query,
        ast = %parsed.ast,
        total_matches,
        returned = results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "search"
    );

    SearchOutcome {
        results,
        total_matches,
        has_error: parsed.has_error(),
        errors: parsed.errors,
    }
}

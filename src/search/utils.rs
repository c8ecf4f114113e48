// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared utilities for the search pipeline.

use crate::tokenizer::tokenize;

/// Bag-of-words terms of the raw query, ignoring its boolean structure.
///
/// Operators and field names are tokens like any other word: `deep AND
/// tag:ml` yields `deep`, `and`, `tag`, `ml`. Duplicates are kept so that
/// repeated words weigh more in scoring.
///
/// # Example
///
/// ```
/// use kbsearch::search::utils::query_terms;
/// assert_eq!(query_terms("Deep NOT learning"), vec!["deep", "not", "learning"]);
/// ```
pub fn query_terms(raw: &str) -> Vec<String> {
    tokenize(raw)
}

/// First occurrence of each term, order kept.
pub fn unique_terms(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        if !out.contains(term) {
            out.push(term.clone());
        }
    }
    out
}

/// Keep `items[offset .. offset + limit]`, clamped to the length.
pub fn paginate<T>(items: &mut Vec<T>, offset: usize, limit: usize) {
    let start = offset.min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    items.truncate(end);
    items.drain(..start);
}

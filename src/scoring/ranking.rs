// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering.
//!
//! One comparator per sort key, flipped for descending order. Sorting is
//! stable, so ties keep the order the executor produced them in (document
//! insertion order) and nothing else breaks them.

use crate::types::{QueryResult, SortBy, SortOrder};
use std::cmp::Ordering;

/// Case-folded comparison first, raw text as the tiebreak.
///
/// Approximates a locale-aware collation: "apple" and "Apple" sort together
/// ahead of "banana" instead of splitting on code point case.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ascending comparison of two results by `sort_by`.
pub fn compare_results(a: &QueryResult<'_>, b: &QueryResult<'_>, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Score => a.score.total_cmp(&b.score),
        SortBy::Title => compare_titles(&a.document.title, &b.document.title),
        SortBy::CreatedAt => a.document.created_at.cmp(&b.document.created_at),
        SortBy::UpdatedAt => a.document.updated_at.cmp(&b.document.updated_at),
    }
}

/// Stable in-place sort by key and direction.
pub fn sort_results(results: &mut [QueryResult<'_>], sort_by: SortBy, order: SortOrder) {
    results.sort_by(|a, b| {
        let ord = compare_results(a, b, sort_by);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

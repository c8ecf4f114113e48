// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Attribute post-filter over query matches.
//!
//! Filters never touch the posting table; they run per candidate after the
//! query tree is evaluated. Every constraint must hold; an empty constraint
//! holds trivially.

use crate::types::{Document, SearchFilters};

/// Does `document` satisfy every constraint in `filters`?
pub fn matches_filters(document: &Document, filters: &SearchFilters) -> bool {
    if !filters.file_types.is_empty() && !filters.file_types.contains(&document.kind) {
        return false;
    }

    if let Some(range) = &filters.date_range {
        if !range.contains(document.created_at) {
            return false;
        }
    }

    if !filters.tags.is_empty() {
        let any_tag = filters.tags.iter().any(|wanted| {
            document
                .tags
                .iter()
                .any(|tag| tag.to_lowercase() == wanted.to_lowercase())
        });
        if !any_tag {
            return false;
        }
    }

    if !filters.authors.is_empty() {
        match &document.author {
            Some(author) if filters.authors.iter().any(|a| a == author) => {}
            _ => return false,
        }
    }

    if !filters.paths.is_empty() {
        match &document.path {
            Some(path) if filters.paths.iter().any(|p| path.starts_with(p.as_str())) => {}
            _ => return false,
        }
    }

    true
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::index::DocumentIndex;
use crate::types::Document;
use chrono::{DateTime, TimeZone, Utc};

/// A page with fixed timestamps, so sorting tests are deterministic.
///
/// This is the canonical implementation used across all tests.
pub fn make_doc(id: &str, title: &str, body: &str) -> Document {
    let at = fixed_time(0);
    Document::new(id, title, body).with_timestamps(at, at)
}

/// `2024-01-01T00:00:00Z` plus `days`.
pub fn fixed_time(days: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200 + days * 86_400, 0)
        .single()
        .unwrap_or_default()
}

/// The two-document corpus used by the ranking scenario.
pub fn scenario_docs() -> Vec<Document> {
    vec![
        make_doc("doc1", "Deep Learning Basics", "deep learning uses neural networks"),
        make_doc("doc2", "Cooking Basics", "deep frying uses hot oil"),
    ]
}

pub fn scenario_index() -> DocumentIndex {
    let mut index = DocumentIndex::new();
    for doc in scenario_docs() {
        // Scenario ids are never blank.
        let _ = index.add_document(doc);
    }
    index
}

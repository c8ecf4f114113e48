// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind relevance.
//!
//! ```text
//! score = Σ_t  tf(t, doc) × idf(t)            t over the query's tokens
//!       × TITLE_BOOST^k                       k = query tokens found in the title
//!
//! tf(t, doc) = occurrences of t / tokens in title + body
//! idf(t)     = ln(total documents / documents containing t)   (0 if none)
//! ```
//!
//! The query is tokenized as a bag of words, independent of its boolean
//! structure: `a NOT b` scores on `a`, `not` and `b` alike. The boolean
//! tree only decides *which* documents are scored.
//!
//! The boost compounds per matching query token and is applied after the
//! sum, so a zero base score stays zero. Duplicated query tokens count twice
//! in both the sum and the boost.

use crate::index::{DocumentIndex, IndexedDocument};

/// Multiplier applied once per query token found in the title.
pub const TITLE_BOOST: f64 = 1.5;

/// Inverse document frequency: `ln(N / df)`, 0 when the term is unindexed.
///
/// Never negative: `df <= N` for any term that exists.
pub fn idf(total_documents: usize, doc_freq: usize) -> f64 {
    if doc_freq == 0 || total_documents == 0 {
        return 0.0;
    }
    (total_documents as f64 / doc_freq as f64).ln()
}

/// Score one document against the query's tokens.
pub fn score_document(index: &DocumentIndex, entry: &IndexedDocument, query_terms: &[String]) -> f64 {
    let total_documents = index.len();
    let inverted = index.inverted();

    let mut score = 0.0;
    for term in query_terms {
        score += entry.term_frequency(term) * idf(total_documents, inverted.doc_freq(term));
    }

    let title = entry.document.title.to_lowercase();
    for term in query_terms {
        if title.contains(term.as_str()) {
            score *= TITLE_BOOST;
        }
    }

    score
}

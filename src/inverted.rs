// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The posting table: term → set of documents containing it.
//!
//! Free-text terms and facet terms (`tag:design`, `type:page`) share one
//! table, so a field query is just a lookup of the composite key. Postings
//! record membership only; term frequencies live with the document.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NON_EMPTY**: every term present has at least one posting. Retracting
//!    the last id removes the term entirely.
//! 2. **NO_STALE_IDS**: an id is listed under a term iff the live document
//!    with that id produces the term. `DocumentIndex` maintains this by
//!    retracting every old term before inserting new ones.

use crate::types::DocId;
use std::collections::{BTreeSet, HashMap};

/// Documents containing one term, in insertion order of the documents.
pub type PostingList = BTreeSet<DocId>;

#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    terms: HashMap<String, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `doc` contains `term`. Idempotent.
    pub fn insert(&mut self, term: &str, doc: DocId) {
        match self.terms.get_mut(term) {
            Some(list) => {
                list.insert(doc);
            }
            None => {
                self.terms.insert(term.to_string(), BTreeSet::from([doc]));
            }
        }
    }

    /// Remove `doc` from `term`'s postings, dropping the term if that
    /// empties it. Returns whether anything was removed.
    pub fn retract(&mut self, term: &str, doc: DocId) -> bool {
        let Some(list) = self.terms.get_mut(term) else {
            return false;
        };
        let removed = list.remove(&doc);
        // INVARIANT: NON_EMPTY
        if list.is_empty() {
            self.terms.remove(term);
        }
        removed
    }

    #[inline]
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Number of documents containing `term` (0 if absent).
    #[inline]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, BTreeSet::len)
    }

    /// Distinct terms, facet terms included.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Sum of posting list sizes.
    pub fn total_postings(&self) -> usize {
        self.terms.values().map(BTreeSet::len).sum()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(term, list)| (term.as_str(), list))
    }

    /// Union of the postings of every term accepted by `accept`.
    ///
    /// Touches every distinct term once: O(terms), not O(postings).
    pub fn union_matching(&self, mut accept: impl FnMut(&str) -> bool) -> PostingList {
        let mut out = PostingList::new();
        for (term, list) in &self.terms {
            if accept(term) {
                out.extend(list.iter().copied());
            }
        }
        out
    }

    /// Terms that start with `prefix` but aren't equal to it, ascending.
    pub fn completions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut matches: Vec<&String> = self
            .terms
            .keys()
            .filter(|term| term.len() > prefix.len() && term.starts_with(prefix))
            .collect();
        matches.sort_unstable();
        matches.into_iter().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }
}

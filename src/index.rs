// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document registry and the indexing/retraction paths around it.
//!
//! Every live document owns a list of the terms it put into the posting
//! table. Removal walks that list instead of scanning all postings, which
//! makes retraction O(distinct terms in the document).
//!
//! # What a document contributes
//!
//! ```text
//! tokenize(title + " " + body)     free-text terms (with frequencies)
//! "tag:" + lowercase(tag)          one facet term per distinct tag
//! "type:" + kind                   exactly one facet term
//! ```

use crate::contracts::check_index_consistent;
use crate::error::{Result, SearchError};
use crate::inverted::{InvertedIndex, PostingList};
use crate::tokenizer::tokenize;
use crate::types::{DocId, Document, IndexStats};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Default number of suggestions when the caller doesn't say.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Facet key for a tag value.
pub fn tag_term(tag: &str) -> String {
    format!("tag:{}", tag.to_lowercase())
}

/// Facet key for a document kind.
pub fn type_term(kind: &str) -> String {
    format!("type:{}", kind.to_lowercase())
}

/// A document plus everything derived from it at index time.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub document: Document,
    /// Occurrences of each free-text term in title + body.
    pub term_counts: HashMap<String, u32>,
    /// Total free-text tokens in title + body.
    pub token_count: usize,
    /// Every distinct term this document put in the posting table.
    pub terms: Vec<String>,
}

impl IndexedDocument {
    /// Tokenize and derive facet terms. Pure: no index access.
    pub fn analyze(document: Document) -> Self {
        let tokens = tokenize(&format!("{} {}", document.title, document.body));
        let token_count = tokens.len();

        let mut term_counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *term_counts.entry(token).or_insert(0) += 1;
        }

        let mut terms: Vec<String> = term_counts.keys().cloned().collect();
        for tag in &document.tags {
            if !tag.is_empty() {
                terms.push(tag_term(tag));
            }
        }
        terms.push(type_term(document.kind.as_str()));
        terms.sort_unstable();
        terms.dedup();

        IndexedDocument {
            document,
            term_counts,
            token_count,
            terms,
        }
    }

    /// `occurrences / total tokens`, 0 for an empty document.
    pub fn term_frequency(&self, term: &str) -> f64 {
        if self.token_count == 0 {
            return 0.0;
        }
        let count = self.term_counts.get(term).copied().unwrap_or(0);
        f64::from(count) / self.token_count as f64
    }
}

/// Reject documents the index can't address.
pub fn validate(document: &Document) -> Result<()> {
    if document.id.trim().is_empty() {
        return Err(SearchError::MissingDocumentId);
    }
    Ok(())
}

/// Live documents and the posting table built from them.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    ids: HashMap<String, DocId>,
    docs: BTreeMap<DocId, IndexedDocument>,
    inverted: InvertedIndex,
    /// Next slot to hand out. Never reset, not even by `clear`.
    next_id: u64,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document, replacing any live document with the same id.
    pub fn add_document(&mut self, document: Document) -> Result<DocId> {
        validate(&document)?;
        let slot = self.insert_analyzed(IndexedDocument::analyze(document));
        check_index_consistent(self);
        Ok(slot)
    }

    /// Same as `add_document`: remove-then-add.
    pub fn update_document(&mut self, document: Document) -> Result<DocId> {
        self.add_document(document)
    }

    /// Index many documents at once.
    ///
    /// Every id is validated before anything is touched, so an error leaves
    /// the index unchanged. Tokenization runs in parallel with the
    /// `parallel` feature; insertion is sequential and in input order, so the
    /// outcome matches calling `add_document` in a loop.
    pub fn add_documents<I>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let documents: Vec<Document> = documents.into_iter().collect();
        documents.iter().try_for_each(validate)?;

        let analyzed = analyze_all(documents);
        let count = analyzed.len();
        for entry in analyzed {
            self.insert_analyzed(entry);
        }
        check_index_consistent(self);

        tracing::debug!(count, total = self.docs.len(), "indexed document batch");
        Ok(count)
    }

    /// Retract a document and all its postings. Returns whether it existed.
    pub fn remove_document(&mut self, id: &str) -> bool {
        let Some(slot) = self.ids.remove(id) else {
            return false;
        };
        if let Some(entry) = self.docs.remove(&slot) {
            for term in &entry.terms {
                self.inverted.retract(term, slot);
            }
            tracing::trace!(id, terms = entry.terms.len(), "retracted document");
        }
        check_index_consistent(self);
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.docs.clear();
        self.inverted.clear();
    }

    fn insert_analyzed(&mut self, entry: IndexedDocument) -> DocId {
        // Full retraction before any insert: no stale postings survive a replace.
        self.remove_document(&entry.document.id);

        let slot = DocId(self.next_id);
        self.next_id += 1;

        for term in &entry.terms {
            self.inverted.insert(term, slot);
        }
        tracing::trace!(
            id = entry.document.id.as_str(),
            terms = entry.terms.len(),
            tokens = entry.token_count,
            "indexed document"
        );
        self.ids.insert(entry.document.id.clone(), slot);
        self.docs.insert(slot, entry);
        slot
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        let slot = self.ids.get(id)?;
        self.docs.get(slot).map(|entry| &entry.document)
    }

    /// Slot currently holding the document with this id.
    pub fn slot_of(&self, id: &str) -> Option<DocId> {
        self.ids.get(id).copied()
    }

    pub fn entry(&self, slot: DocId) -> Option<&IndexedDocument> {
        self.docs.get(&slot)
    }

    pub fn entries(&self) -> impl Iterator<Item = (DocId, &IndexedDocument)> {
        self.docs.iter().map(|(slot, entry)| (*slot, entry))
    }

    /// Every live slot: the universe `NOT` subtracts from.
    pub fn all_slots(&self) -> PostingList {
        self.docs.keys().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    #[inline]
    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    pub(crate) fn id_map(&self) -> &HashMap<String, DocId> {
        &self.ids
    }

    // -------------------------------------------------------------------------
    // Suggestions and stats
    // -------------------------------------------------------------------------

    /// Index terms extending `prefix` (lower-cased), exact match excluded.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }
        self.inverted.completions(&prefix.to_lowercase(), limit)
    }

    pub fn stats(&self) -> IndexStats {
        let total_documents = self.docs.len();
        let average_document_size = if total_documents == 0 {
            0.0
        } else {
            let total_chars: usize = self
                .docs
                .values()
                .map(|entry| entry.document.body.chars().count())
                .sum();
            total_chars as f64 / total_documents as f64
        };

        IndexStats {
            total_documents,
            total_terms: self.inverted.term_count(),
            average_document_size,
            index_size: self.inverted.total_postings(),
        }
    }
}

/// Analyze a batch using parallel map (one task per document).
#[cfg(feature = "parallel")]
fn analyze_all(documents: Vec<Document>) -> Vec<IndexedDocument> {
    documents
        .into_par_iter()
        .map(IndexedDocument::analyze)
        .collect()
}

/// Sequential version for non-parallel builds.
#[cfg(not(feature = "parallel"))]
fn analyze_all(documents: Vec<Document>) -> Vec<IndexedDocument> {
    documents.into_iter().map(IndexedDocument::analyze).collect()
}

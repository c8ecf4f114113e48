// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `SearchEngine`: the public facade over index, parser and ranker.
//!
//! Owns one [`DocumentIndex`] and a set of default [`SearchOptions`]. All
//! mutation goes through `&mut self`, so a single engine is single-writer by
//! construction; wrap it in [`crate::SharedEngine`] to share it across
//! threads.

use crate::error::Result;
use crate::index::{DocumentIndex, DEFAULT_SUGGESTION_LIMIT};
use crate::search::{self, SearchOutcome};
use crate::types::{Document, IndexStats, QueryResult, SearchOptions};

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    index: DocumentIndex,
    default_options: SearchOptions,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose `search` uses `options` instead of the stock defaults.
    pub fn with_default_options(options: SearchOptions) -> Self {
        SearchEngine {
            index: DocumentIndex::new(),
            default_options: options,
        }
    }

    pub fn default_options(&self) -> &SearchOptions {
        &self.default_options
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Index `document`, replacing any live document with the same id.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::MissingDocumentId`] if the id is empty or blank.
    pub fn add_document(&mut self, document: Document) -> Result<()> {
        self.index.add_document(document).map(|_| ())
    }

    /// Remove-then-add. Updating an unknown id just adds it.
    pub fn update_document(&mut self, document: Document) -> Result<()> {
        self.index.update_document(document).map(|_| ())
    }

    /// Index a batch; nothing is indexed if any id is invalid.
    pub fn add_documents<I>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        self.index.add_documents(documents)
    }

    /// Returns whether a document with this id existed.
    pub fn remove_document(&mut self, id: &str) -> bool {
        self.index.remove_document(id)
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Search with the engine's default options.
    pub fn search(&self, query: &str) -> Vec<QueryResult<'_>> {
        self.search_with(query, &self.default_options)
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<QueryResult<'_>> {
        self.search_detailed(query, options).results
    }

    /// Results plus total match count and any syntax errors.
    pub fn search_detailed(&self, query: &str, options: &SearchOptions) -> SearchOutcome<'_> {
        search::search(&self.index, query, options)
    }

    /// Index terms extending `prefix`; `limit` defaults to 10.
    pub fn suggestions(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        self.index
            .suggestions(prefix, limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT))
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn get_document(&self, id: &str) -> Option<&Document> {
        self.index.get(id)
    }

    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Read access to the underlying index, e.g. for [`crate::contracts::verify`].
    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }
}

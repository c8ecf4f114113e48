// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A cloneable, thread-safe handle to one engine.
//!
//! Reads (search, suggestions, stats) take a shared lock and overlap;
//! mutations take the exclusive lock, so no reader ever sees a document
//! half-indexed or half-retracted.
//!
//! Search results borrow from the engine, so they can only be used inside
//! [`SharedEngine::read`]; serialize or copy out what you need there.

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::types::{Document, IndexStats};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<SearchEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SearchEngine) -> Self {
        SharedEngine {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&SearchEngine) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the exclusive lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut SearchEngine) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn add_document(&self, document: Document) -> Result<()> {
        self.write(|engine| engine.add_document(document))
    }

    pub fn update_document(&self, document: Document) -> Result<()> {
        self.write(|engine| engine.update_document(document))
    }

    pub fn add_documents(&self, documents: Vec<Document>) -> Result<usize> {
        self.write(|engine| engine.add_documents(documents))
    }

    pub fn remove_document(&self, id: &str) -> bool {
        self.write(|engine| engine.remove_document(id))
    }

    /// Ids of the default-options result page, best first.
    pub fn search_ids(&self, query: &str) -> Vec<String> {
        self.read(|engine| {
            engine
                .search(query)
                .into_iter()
                .map(|result| result.document.id.clone())
                .collect()
        })
    }

    pub fn suggestions(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        self.read(|engine| engine.suggestions(prefix, limit))
    }

    pub fn stats(&self) -> IndexStats {
        self.read(SearchEngine::stats)
    }
}

impl From<SearchEngine> for SharedEngine {
    fn from(engine: SearchEngine) -> Self {
        SharedEngine::new(engine)
    }
}

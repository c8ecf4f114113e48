// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory full-text search for knowledge-base documents.
//!
//! Pages, blocks and tags are indexed into an inverted index; queries in a
//! small boolean language (`AND`, `OR`, `NOT`, parentheses, `"phrases"`,
//! `wild*cards`, `field:value`) are parsed fail-soft, evaluated as set
//! algebra over posting lists, filtered, ranked by TF-IDF with a title boost,
//! highlighted, sorted and paginated.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────────────────────┐
//! │ tokenizer   │───▶│ index        │───▶│ search                       │
//! │ (terms)     │    │ (documents,  │    │ executor → filter → scoring  │
//! └─────────────┘    │  inverted)   │    │ → ranking → highlight        │
//! ┌─────────────┐    └──────────────┘    └──────────────────────────────┘
//! │ query       │────────────────────────────────▲
//! │ (lexer,     │        engine (facade) · shared (RwLock) · protocol
//! │  parser)    │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use kbsearch::{Document, SearchEngine};
//!
//! let mut engine = SearchEngine::new();
//! engine.add_document(Document::new("doc1", "Deep Learning Basics", "deep learning uses neural networks"))?;
//! engine.add_document(Document::new("doc2", "Cooking Basics", "deep frying uses hot oil"))?;
//!
//! let results = engine.search("deep learning");
//! assert_eq!(results[0].document.id, "doc1");
//! assert_eq!(results.len(), 2);
//! # Ok::<(), kbsearch::SearchError>(())
//! ```

pub mod contracts;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod index;
pub mod inverted;
pub mod protocol;
pub mod query;
pub mod scoring;
pub mod search;
pub mod shared;
pub mod tokenizer;
mod types;

#[doc(hidden)]
pub mod testing;

pub use contracts::InvariantError;
pub use engine::SearchEngine;
pub use error::SearchError;
pub use query::{parse, ParseOutcome, QueryNode, SyntaxError};
pub use search::SearchOutcome;
pub use shared::SharedEngine;
pub use tokenizer::tokenize;
pub use types::{
    DateRange, DocId, Document, DocumentKind, Highlight, HighlightTags, IndexStats, MatchField,
    QueryResult, SearchFilters, SearchOptions, SortBy, SortOrder, DEFAULT_FRAGMENT_SIZE,
    DEFAULT_LIMIT, DEFAULT_MAX_FRAGMENTS,
};

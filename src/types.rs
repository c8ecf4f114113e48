// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search engine.
//!
//! Documents go in, `QueryResult`s come out, and `SearchOptions` decide
//! how many and in what order. Everything here serializes with camelCase
//! keys so the same shapes travel over the request envelope unchanged.
//!
//! # Invariants
//!
//! - **Document**: `id` is non-empty and unique among live documents.
//!   Re-adding an id replaces the old document after full retraction.
//! - **QueryResult**: `score >= 0`, and `highlights` never contains a field
//!   with zero fragments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Internal document slot.
///
/// Callers address documents by their string id; the index hands out one of
/// these per insertion and never reuses it, so a posting can't silently start
/// pointing at a different document after a remove/add cycle. Ordering is
/// insertion order, which keeps result sets deterministic. 64 bits so that
/// the counter cannot wrap onto a live slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u64);

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// What kind of knowledge-base entity a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Page,
    Block,
    Tag,
}

impl DocumentKind {
    /// Lowercase name, as used in `type:<kind>` facet terms.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Page => "page",
            DocumentKind::Block => "block",
            DocumentKind::Tag => "tag",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A searchable page, block or tag.
///
/// `title` and `body` are tokenized for free-text search; `tags` and `kind`
/// become facet terms (`tag:<v>`, `type:<v>`). Everything else is carried
/// for filtering, sorting and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: DocumentKind,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Ordered, duplicate-free once indexed.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Open map of caller-defined fields. Stored, not indexed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
}

fn default_kind() -> DocumentKind {
    DocumentKind::Page
}

impl Document {
    /// A page with the given id, title and body, timestamped now.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Document {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            kind: DocumentKind::Page,
            path: None,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            author: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Which document field a highlight or match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Body,
    Tags,
}

impl MatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Body => "body",
            MatchField::Tags => "tags",
        }
    }
}

/// Highlighted fragments for one field of one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub field: MatchField,
    /// Windows around matches, in match order, with highlight tags applied.
    pub fragments: Vec<String>,
    /// The complete, untouched field text.
    pub original: String,
}

/// One ranked hit.
///
/// Borrows the document from the index: results are recomputed per query
/// and never outlive the engine that produced them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a> {
    pub document: &'a Document,
    pub score: f64,
    pub highlights: Vec<Highlight>,
    pub matched_fields: BTreeSet<MatchField>,
}

/// Index-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_documents: usize,
    /// Distinct terms, facet terms included.
    pub total_terms: usize,
    /// Mean body length in characters.
    pub average_document_size: f64,
    /// Sum of all posting list sizes.
    pub index_size: usize,
}

// =============================================================================
// SEARCH OPTIONS
// =============================================================================

/// Sort key for results.
///
/// Deserializes from any string; names it doesn't recognize fall back to
/// `Score` rather than failing the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SortBy {
    #[default]
    Score,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl From<&str> for SortBy {
    fn from(value: &str) -> Self {
        match value {
            "title" => SortBy::Title,
            "createdAt" | "created_at" => SortBy::CreatedAt,
            "updatedAt" | "updated_at" => SortBy::UpdatedAt,
            _ => SortBy::Score,
        }
    }
}

impl From<String> for SortBy {
    fn from(value: String) -> Self {
        SortBy::from(value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Markup wrapped around each highlighted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTags {
    pub pre: String,
    pub post: String,
}

impl Default for HighlightTags {
    fn default() -> Self {
        HighlightTags {
            pre: "<mark>".to_string(),
            post: "</mark>".to_string(),
        }
    }
}

/// Inclusive `createdAt` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Attribute constraints applied after query evaluation.
///
/// An empty collection means "no constraint" for that attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    pub file_types: BTreeSet<DocumentKind>,
    pub date_range: Option<DateRange>,
    /// Match if the document carries any of these (case-insensitive).
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    /// Match if the document path starts with any of these.
    pub paths: Vec<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.file_types.is_empty()
            && self.date_range.is_none()
            && self.tags.is_empty()
            && self.authors.is_empty()
            && self.paths.is_empty()
    }
}

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_FRAGMENT_SIZE: usize = 150;
pub const DEFAULT_MAX_FRAGMENTS: usize = 3;

/// Knobs for a single search call. Any subset may be given in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub highlight: bool,
    pub highlight_tags: HighlightTags,
    pub fragment_size: usize,
    pub max_fragments: usize,
    pub filters: SearchFilters,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort_by: SortBy::Score,
            sort_order: SortOrder::Desc,
            highlight: true,
            highlight_tags: HighlightTags::default(),
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            max_fragments: DEFAULT_MAX_FRAGMENTS,
            filters: SearchFilters::default(),
        }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

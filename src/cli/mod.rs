// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the kbsearch command-line interface.
//!
//! `serve` runs the request envelope over stdin/stdout as JSON lines. The
//! other subcommands load a JSON array of documents, index it in memory, and
//! answer one query against it.

pub mod display;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kbsearch::{DocumentKind, SearchFilters, SearchOptions, SortBy, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kbsearch",
    about = "In-memory full-text search over knowledge-base documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer JSON-lines requests on stdin, one response per line on stdout
    Serve {
        /// Documents to index before the first request
        #[arg(long)]
        preload: Option<PathBuf>,

        /// Documents per progress response during batch indexing (0 = none)
        #[arg(long, default_value_t = kbsearch::protocol::DEFAULT_PROGRESS_INTERVAL)]
        progress_interval: usize,
    },

    /// Search a JSON array of documents
    Search {
        /// Path to the documents file
        docs: PathBuf,

        /// Query, e.g. `deep AND tag:ml NOT draft`
        query: String,

        #[command(flatten)]
        options: SearchArgs,
    },

    /// List index terms that extend a prefix
    Suggest {
        /// Path to the documents file
        docs: PathBuf,

        prefix: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print index counters for a documents file
    Stats {
        /// Path to the documents file
        docs: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Maximum number of results
    #[arg(short, long, default_value_t = kbsearch::DEFAULT_LIMIT)]
    pub limit: usize,

    /// Results to skip before the first one returned
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    #[arg(long, value_enum, default_value_t = SortKey::Score)]
    pub sort_by: SortKey,

    /// Ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Skip highlighting
    #[arg(long)]
    pub no_highlight: bool,

    /// Characters per highlight fragment
    #[arg(long, default_value_t = kbsearch::DEFAULT_FRAGMENT_SIZE)]
    pub fragment_size: usize,

    /// Fragments per field
    #[arg(long, default_value_t = kbsearch::DEFAULT_MAX_FRAGMENTS)]
    pub max_fragments: usize,

    /// Only these kinds (repeatable)
    #[arg(long = "kind", value_enum)]
    pub kinds: Vec<KindArg>,

    /// Require any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Require one of these authors (repeatable)
    #[arg(long = "author")]
    pub authors: Vec<String>,

    /// Require a path starting with one of these (repeatable)
    #[arg(long = "path")]
    pub paths: Vec<String>,

    /// Emit the full outcome as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKey {
    Score,
    Title,
    Created,
    Updated,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Page,
    Block,
    Tag,
}

impl From<SortKey> for SortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Score => SortBy::Score,
            SortKey::Title => SortBy::Title,
            SortKey::Created => SortBy::CreatedAt,
            SortKey::Updated => SortBy::UpdatedAt,
        }
    }
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Page => DocumentKind::Page,
            KindArg::Block => DocumentKind::Block,
            KindArg::Tag => DocumentKind::Tag,
        }
    }
}

impl SearchArgs {
    pub fn to_options(&self) -> SearchOptions {
        let order = if self.asc { SortOrder::Asc } else { SortOrder::Desc };
        let mut options = SearchOptions::default()
            .with_limit(self.limit)
            .with_offset(self.offset)
            .with_sort(self.sort_by.into(), order)
            .with_highlight(!self.no_highlight)
            .with_filters(SearchFilters {
                file_types: self.kinds.iter().map(|&k| k.into()).collect(),
                date_range: None,
                tags: self.tags.clone(),
                authors: self.authors.clone(),
                paths: self.paths.clone(),
            });
        options.fragment_size = self.fragment_size;
        options.max_fragments = self.max_fragments;
        options
    }
}

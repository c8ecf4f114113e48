// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlighting: fragments of title and body around each query term.
//!
//! For every term (in query order) and every case-insensitive occurrence of
//! it, take a `fragment_size`-char window centered on the match, wrap every
//! occurrence of the term inside the window in the highlight tags, and mark
//! truncation with `...` on either side. The first `max_fragments` windows
//! per field are kept, in discovery order. A field with no fragments is
//! left out of the result.
//!
//! Positions are char offsets, never byte offsets, so windows can't split a
//! UTF-8 sequence.

use crate::tokenizer::{fold_char, fold_chars};
use crate::types::{Document, Highlight, MatchField, SearchOptions};
use regex::{Captures, Regex};
use std::collections::BTreeSet;

/// Added to each side of a truncated fragment.
pub const ELLIPSIS: &str = "...";

struct TermMatcher {
    /// Term folded char-by-char, matched against folded field text.
    needle: Vec<char>,
    /// Case-insensitive literal, used to wrap matches inside a fragment.
    wrap: Regex,
}

/// Per-search highlighter. Compiles each term once, then runs per document.
pub struct Highlighter<'o> {
    matchers: Vec<TermMatcher>,
    options: &'o SearchOptions,
}

impl<'o> Highlighter<'o> {
    pub fn new(terms: &[String], options: &'o SearchOptions) -> Self {
        let matchers = terms
            .iter()
            .filter(|term| !term.is_empty())
            .filter_map(|term| {
                let wrap = Regex::new(&format!("(?i){}", regex::escape(term))).ok()?;
                Some(TermMatcher {
                    needle: term.chars().map(fold_char).collect(),
                    wrap,
                })
            })
            .collect();
        Highlighter { matchers, options }
    }

    /// Highlights for the title and body of `document`, in that order.
    pub fn highlight(&self, document: &Document) -> Vec<Highlight> {
        [
            (MatchField::Title, document.title.as_str()),
            (MatchField::Body, document.body.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, text)| self.highlight_field(field, text))
        .collect()
    }

    fn highlight_field(&self, field: MatchField, text: &str) -> Option<Highlight> {
        let max_fragments = self.options.max_fragments;
        if max_fragments == 0 || text.is_empty() {
            return None;
        }

        let chars: Vec<char> = text.chars().collect();
        let folded = fold_chars(text);
        let mut fragments = Vec::new();

        'terms: for matcher in &self.matchers {
            for start in find_all(&folded, &matcher.needle) {
                if fragments.len() >= max_fragments {
                    break 'terms;
                }
                fragments.push(self.fragment(&chars, start, matcher.needle.len(), &matcher.wrap));
            }
        }

        if fragments.is_empty() {
            return None;
        }
        Some(Highlight {
            field,
            fragments,
            original: text.to_string(),
        })
    }

    /// Window of `fragment_size` chars centered on `chars[start..start + len]`.
    fn fragment(&self, chars: &[char], start: usize, len: usize, wrap: &Regex) -> String {
        let size = self.options.fragment_size;
        let center = start + len / 2;
        let from = center.saturating_sub(size / 2);
        let to = from.saturating_add(size).min(chars.len());
        let from = from.min(to);

        let window: String = chars[from..to].iter().collect();
        let tags = &self.options.highlight_tags;
        let marked = wrap.replace_all(&window, |caps: &Captures<'_>| {
            format!("{}{}{}", tags.pre, &caps[0], tags.post)
        });

        let mut fragment = String::with_capacity(marked.len() + 2 * ELLIPSIS.len());
        if from > 0 {
            fragment.push_str(ELLIPSIS);
        }
        fragment.push_str(&marked);
        if to < chars.len() {
            fragment.push_str(ELLIPSIS);
        }
        fragment
    }
}

/// Start offsets of non-overlapping occurrences of `needle` in `hay`.
fn find_all(hay: &[char], needle: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    if needle.is_empty() || needle.len() > hay.len() {
        return starts;
    }
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == *needle {
            starts.push(i);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    starts
}

/// Fields in which any of `terms` occurs (case-insensitive).
///
/// Title and body match on substring; tags match when a term equals the
/// whole tag.
pub fn matched_fields(document: &Document, terms: &[String]) -> BTreeSet<MatchField> {
    let mut fields = BTreeSet::new();
    if terms.is_empty() {
        return fields;
    }

    let title = document.title.to_lowercase();
    let body = document.body.to_lowercase();
    let tags: Vec<String> = document.tags.iter().map(|t| t.to_lowercase()).collect();

    for term in terms {
        if title.contains(term.as_str()) {
            fields.insert(MatchField::Title);
        }
        if body.contains(term.as_str()) {
            fields.insert(MatchField::Body);
        }
        if tags.iter().any(|tag| tag == term) {
            fields.insert(MatchField::Tags);
        }
    }
    fields
}

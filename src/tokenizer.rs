// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization shared by indexing, scoring and highlighting.
//!
//! Every path that turns text into terms goes through [`tokenize`]. If the
//! indexer and the query side ever disagreed on what a term looks like, a
//! document could contain "Rust" and still never be found by "rust".

/// Word boundary detection: anything that isn't a letter or digit.
#[inline]
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split text into lower-case alphanumeric terms.
///
/// Punctuation becomes whitespace and empty tokens are dropped, so
/// `"Deep-learning, basics!"` yields `["deep", "learning", "basics"]`.
/// Duplicates are kept: term frequency is counted from this output.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_word_boundary)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fold a single character to lower case without changing the char count.
///
/// `char::to_lowercase` can expand (`'İ'` becomes two chars). Highlighting
/// maps positions between original and folded text one char at a time, so
/// expansions keep only their first char.
#[inline]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Char-for-char lower-case copy of `text` (see [`fold_char`]).
pub fn fold_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

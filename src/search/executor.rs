// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation: syntax tree to set of matching document slots.
//!
//! Structural recursion over [`QueryNode`], one rule per variant:
//!
//! | Node       | Result                                                    |
//! |------------|-----------------------------------------------------------|
//! | `Term`     | postings of the lower-cased literal                       |
//! | `Phrase`   | intersection of the postings of each tokenized word       |
//! | `Wildcard` | union of postings of every index term the pattern matches |
//! | `Field`    | postings of `name:value`, or a wildcard over that prefix  |
//! | `Range`    | empty                                                     |
//! | `And/Or`   | intersection / union                                      |
//! | `Not`      | every live slot minus the operand                         |
//!
//! Recursion follows the tree, whose height the parser caps at
//! [`MAX_DEPTH`](crate::query::MAX_DEPTH).
//!
//! Phrases are co-occurrence, not adjacency: postings carry no positions.
//! A missing term is an empty set, never an error.

use crate::index::DocumentIndex;
use crate::inverted::PostingList;
use crate::query::QueryNode;
use crate::tokenizer::tokenize;
use regex::Regex;

/// Evaluate `node` against the index.
pub fn execute_query(index: &DocumentIndex, node: &QueryNode) -> PostingList {
    match node {
        QueryNode::Term { value } => lookup(index, &value.to_lowercase()),
        QueryNode::Phrase { value } => phrase(index, value),
        QueryNode::Wildcard { pattern } => wildcard(index, "", pattern),
        QueryNode::Field { name, value } => field(index, name, value),
        QueryNode::Range { .. } => PostingList::new(),
        QueryNode::And { left, right } => {
            let left = execute_query(index, left);
            if left.is_empty() {
                return left;
            }
            let right = execute_query(index, right);
            left.intersection(&right).copied().collect()
        }
        QueryNode::Or { left, right } => {
            let mut left = execute_query(index, left);
            left.extend(execute_query(index, right));
            left
        }
        QueryNode::Not { operand } => {
            let excluded = execute_query(index, operand);
            index
                .all_slots()
                .difference(&excluded)
                .copied()
                .collect()
        }
    }
}

fn lookup(index: &DocumentIndex, term: &str) -> PostingList {
    index.inverted().postings(term).cloned().unwrap_or_default()
}

fn phrase(index: &DocumentIndex, value: &str) -> PostingList {
    let words = tokenize(value);
    let mut words = words.iter();
    let Some(first) = words.next() else {
        return PostingList::new();
    };

    let mut acc = lookup(index, first);
    for word in words {
        if acc.is_empty() {
            break;
        }
        let Some(list) = index.inverted().postings(word) else {
            return PostingList::new();
        };
        acc.retain(|slot| list.contains(slot));
    }
    acc
}

/// Union of postings of every term matching `prefix` + `pattern`.
fn wildcard(index: &DocumentIndex, prefix: &str, pattern: &str) -> PostingList {
    let Some(re) = compile_wildcard(prefix, pattern) else {
        return PostingList::new();
    };
    index.inverted().union_matching(|term| re.is_match(term))
}

fn field(index: &DocumentIndex, name: &str, value: &QueryNode) -> PostingList {
    let prefix = format!("{}:", name.to_lowercase());
    match value {
        QueryNode::Term { value } | QueryNode::Phrase { value } => {
            lookup(index, &format!("{}{}", prefix, value.to_lowercase()))
        }
        QueryNode::Wildcard { pattern } => wildcard(index, &prefix, pattern),
        // The parser only builds fields over literal values.
        _ => PostingList::new(),
    }
}

/// Anchored, case-insensitive regex for a `*`/`?` pattern.
///
/// `*` matches any run of chars, `?` exactly one; everything else, including
/// `prefix`, is literal.
pub fn compile_wildcard(prefix: &str, pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(prefix.len() + pattern.len() * 2 + 6);
    source.push_str("(?i)^");
    source.push_str(&regex::escape(prefix));

    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');

    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "wildcard did not compile");
            None
        }
    }
}

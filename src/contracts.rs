// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the document index.
//!
//! [`verify`] walks the whole index and reports the first broken invariant.
//! [`check_index_consistent`] runs it after every mutation in debug builds
//! and compiles to nothing in release.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract              | Meaning                                          |
//! |-----------------------|--------------------------------------------------|
//! | `EmptyPostingList`    | no term maps to an empty set                     |
//! | `StalePosting`        | every posted slot belongs to a live document     |
//! | `UnexpectedPosting`   | a slot is posted only under terms its doc derives|
//! | `MissingPosting`      | every derived term lists the document            |
//! | `RegistryMismatch`    | id map and document table agree one-to-one      |

use crate::index::DocumentIndex;
use crate::types::DocId;
use std::collections::HashSet;
use thiserror::Error;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("posting list for '{term}' is empty")]
    EmptyPostingList { term: String },

    #[error("posting list for '{term}' lists slot {slot:?} with no live document")]
    StalePosting { term: String, slot: DocId },

    #[error("slot {slot:?} is posted under '{term}' but its document doesn't produce it")]
    UnexpectedPosting { term: String, slot: DocId },

    #[error("document '{id}' produces '{term}' but isn't in its posting list")]
    MissingPosting { id: String, term: String },

    #[error("id map and document table disagree about '{id}'")]
    RegistryMismatch { id: String },
}

/// Check every index invariant. O(total postings).
pub fn verify(index: &DocumentIndex) -> Result<(), InvariantError> {
    // Registry: id -> slot -> document with that id, and nothing extra.
    if index.id_map().len() != index.len() {
        let orphan = index
            .entries()
            .find(|(slot, entry)| index.slot_of(&entry.document.id) != Some(*slot))
            .map(|(_, entry)| entry.document.id.clone())
            .unwrap_or_default();
        return Err(InvariantError::RegistryMismatch { id: orphan });
    }
    for (id, slot) in index.id_map() {
        match index.entry(*slot) {
            Some(entry) if entry.document.id == *id => {}
            _ => return Err(InvariantError::RegistryMismatch { id: id.clone() }),
        }
    }

    // Forward direction: postings only reference live docs that derive the term.
    let derived: Vec<(DocId, HashSet<&str>)> = index
        .entries()
        .map(|(slot, entry)| (slot, entry.terms.iter().map(String::as_str).collect()))
        .collect();
    let derived_of = |slot: DocId| {
        derived
            .binary_search_by_key(&slot, |(s, _)| *s)
            .ok()
            .map(|i| &derived[i].1)
    };

    for (term, list) in index.inverted().terms() {
        if list.is_empty() {
            return Err(InvariantError::EmptyPostingList {
                term: term.to_string(),
            });
        }
        for slot in list {
            match derived_of(*slot) {
                None => {
                    return Err(InvariantError::StalePosting {
                        term: term.to_string(),
                        slot: *slot,
                    })
                }
                Some(terms) if !terms.contains(term) => {
                    return Err(InvariantError::UnexpectedPosting {
                        term: term.to_string(),
                        slot: *slot,
                    })
                }
                Some(_) => {}
            }
        }
    }

    // Reverse direction: every derived term is posted.
    for (slot, entry) in index.entries() {
        for term in &entry.terms {
            let posted = index
                .inverted()
                .postings(term)
                .is_some_and(|list| list.contains(&slot));
            if !posted {
                return Err(InvariantError::MissingPosting {
                    id: entry.document.id.clone(),
                    term: term.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Panic on any invariant violation (debug builds only).
#[cfg(debug_assertions)]
#[inline]
pub fn check_index_consistent(index: &DocumentIndex) {
    if let Err(violation) = verify(index) {
        panic!("Contract violation: {}", violation);
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub fn check_index_consistent(_index: &DocumentIndex) {}

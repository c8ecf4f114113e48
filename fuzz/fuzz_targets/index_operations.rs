// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for index mutation sequences.
//!
//! Random adds, updates and removals over a handful of ids must leave the
//! index internally consistent.

#![no_main]

use arbitrary::Arbitrary;
use kbsearch::contracts::verify;
use kbsearch::{Document, SearchEngine};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Add { id: u8, title: String, body: String, tags: Vec<String> },
    Update { id: u8, body: String },
    Remove { id: u8 },
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut engine = SearchEngine::new();

    for op in ops.into_iter().take(64) {
        match op {
            Op::Add { id, title, body, tags } => {
                let doc = Document::new(format!("d{}", id % 8), title, body).with_tags(tags);
                engine.add_document(doc).expect("generated ids are never blank");
            }
            Op::Update { id, body } => {
                let doc = Document::new(format!("d{}", id % 8), "", body);
                engine.update_document(doc).expect("generated ids are never blank");
            }
            Op::Remove { id } => {
                engine.remove_document(&format!("d{}", id % 8));
            }
            Op::Clear => engine.clear(),
        }
    }

    // INVARIANT: forward and reverse index agree, no empty or stale postings
    if let Err(violation) = verify(engine.index()) {
        panic!("index inconsistent: {}", violation);
    }
    assert!(engine.document_count() <= 8);
});

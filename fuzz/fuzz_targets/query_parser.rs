// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query parser.
//!
//! Parsing is total: every string yields a tree, and a fatal syntax error
//! always yields the raw query as a single term.

#![no_main]

use kbsearch::{parse, QueryNode, SyntaxError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let raw: String = raw.chars().take(512).collect();

    let outcome = parse(&raw);

    // INVARIANT 1: fatal errors fall back to the raw term
    let fatal = outcome.errors.iter().any(|err| {
        !matches!(
            err,
            SyntaxError::UnclosedGroup { .. } | SyntaxError::UnmatchedCloseParen { .. }
        )
    });
    if fatal {
        assert_eq!(outcome.ast, QueryNode::term(raw.trim()));
    }

    // INVARIANT 2: positions point inside the query
    let len = raw.chars().count();
    for err in &outcome.errors {
        let position = match err {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::MissingFieldValue { position, .. }
            | SyntaxError::UnclosedGroup { position }
            | SyntaxError::UnmatchedCloseParen { position }
            | SyntaxError::NestingTooDeep { position } => *position,
            SyntaxError::EmptyQuery | SyntaxError::UnexpectedEnd => 0,
        };
        assert!(position <= len, "position {} past end {}", position, len);
    }

    // INVARIANT 3: Display never panics
    let _ = outcome.ast.to_string();
});

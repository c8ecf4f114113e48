// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query language: a small compiler from text to a syntax tree.
//!
//! `lexer` turns the raw string into tokens, `parser` builds a [`QueryNode`]
//! tree from them, and the executor in `search` evaluates that tree against
//! the posting table. Parsing is fail-soft: a broken query still yields a
//! tree plus a list of what was wrong with it.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::QueryNode;
pub use parser::{parse, ParseOutcome, SyntaxError, MAX_DEPTH};

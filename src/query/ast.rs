// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query syntax tree.
//!
//! Terminals are leaves, `And`/`Or` are binary, `Not` is unary and `Field`
//! wraps exactly one value. The executor matches on this exhaustively, so a
//! new variant is a compile error until every consumer handles it.
//!
//! Consumers recurse. Trees from [`parse`](super::parse) are at most
//! [`MAX_DEPTH`](super::MAX_DEPTH) high.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryNode {
    Term { value: String },
    /// Quoted text, escapes already resolved.
    Phrase { value: String },
    /// Contains at least one `*` or `?`.
    Wildcard { pattern: String },
    Field { name: String, value: Box<QueryNode> },
    /// `[from TO to]`. Parsed but never matches anything.
    Range { from: String, to: String },
    And { left: Box<QueryNode>, right: Box<QueryNode> },
    Or { left: Box<QueryNode>, right: Box<QueryNode> },
    Not { operand: Box<QueryNode> },
}

impl QueryNode {
    pub fn term(value: impl Into<String>) -> Self {
        QueryNode::Term {
            value: value.into(),
        }
    }

    pub fn phrase(value: impl Into<String>) -> Self {
        QueryNode::Phrase {
            value: value.into(),
        }
    }

    pub fn wildcard(pattern: impl Into<String>) -> Self {
        QueryNode::Wildcard {
            pattern: pattern.into(),
        }
    }

    pub fn field(name: impl Into<String>, value: QueryNode) -> Self {
        QueryNode::Field {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn and(left: QueryNode, right: QueryNode) -> Self {
        QueryNode::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: QueryNode, right: QueryNode) -> Self {
        QueryNode::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: QueryNode) -> Self {
        QueryNode::Not {
            operand: Box::new(operand),
        }
    }
}

/// Canonical, fully parenthesized form.
impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term { value } => f.write_str(value),
            QueryNode::Phrase { value } => {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
            QueryNode::Wildcard { pattern } => f.write_str(pattern),
            QueryNode::Field { name, value } => write!(f, "{}:{}", name, value),
            QueryNode::Range { from, to } => write!(f, "[{} TO {}]", from, to),
            QueryNode::And { left, right } => write!(f, "({} AND {})", left, right),
            QueryNode::Or { left, right } => write!(f, "({} OR {})", left, right),
            QueryNode::Not { operand } => write!(f, "NOT {}", operand),
        }
    }
}

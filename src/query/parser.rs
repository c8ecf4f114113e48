// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent query parser.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! Expr     := OrExpr
//! OrExpr   := AndExpr ("OR" AndExpr)*
//! AndExpr  := NotExpr (("AND" NotExpr) | NotExpr)*     -- adjacency binds here
//! NotExpr  := "NOT" Primary | Primary
//! Primary  := "(" Expr ")" | Field | Range | Phrase | Wildcard | Term
//! Field    := ident ":" (Term | Phrase | Wildcard | Range)
//! ```
//!
//! Adjacent operands with no operator between them bind at `AND`
//! precedence. A negated operand restricts (`a NOT b` is `a AND NOT b`); a
//! positive one widens (`deep learning` is `deep OR learning`), leaving the
//! ranking to put documents with both words first.
//!
//! Runs of one operator are associative, so they are built as balanced
//! trees: a pasted paragraph of ten thousand words is fifteen levels high,
//! not ten thousand. Groups may nest at most [`MAX_DEPTH`] levels and the
//! finished tree is at most [`MAX_DEPTH`] high; past that the query is
//! treated as fatally malformed.
//!
//! One token of lookahead, no backtracking. Problems come in two flavors:
//!
//! - **Recoverable** (missing `)`, stray `)`): recorded, the tree is kept.
//! - **Fatal** (field without value, dangling operator, empty group,
//!   nesting past [`MAX_DEPTH`]): the whole query degrades to a single term
//!   node holding the raw text.
//!
//! Either way `parse` returns a usable tree; syntax errors never escape.

use super::ast::QueryNode;
use super::lexer::{tokenize_query, Token, TokenKind};
use serde::Serialize;
use thiserror::Error;

/// Deepest group nesting, and tallest tree, the parser will build.
pub const MAX_DEPTH: usize = 64;

/// A query syntax problem. Positions are char offsets into the raw query.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SyntaxError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("query ends where an operand was expected")]
    UnexpectedEnd,

    #[error("field '{field}' at position {position} has no value")]
    MissingFieldValue { field: String, position: usize },

    #[error("group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("unmatched ')' at position {position}")]
    UnmatchedCloseParen { position: usize },

    #[error("query nests more than {max} levels deep at position {position}", max = MAX_DEPTH)]
    NestingTooDeep { position: usize },
}

/// What the parser produced for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub ast: QueryNode,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    #[inline]
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Groups currently open.
    nesting: usize,
    /// Recoverable problems seen so far.
    errors: Vec<SyntaxError>,
}

/// A parsed subtree and its height (a leaf is 1).
struct Sub {
    node: QueryNode,
    depth: usize,
}

impl Sub {
    fn leaf(node: QueryNode) -> Self {
        Sub { node, depth: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
}

impl Op {
    fn join(self, left: QueryNode, right: QueryNode) -> QueryNode {
        match self {
            Op::And => QueryNode::and(left, right),
            Op::Or => QueryNode::or(left, right),
        }
    }
}

/// Operands joined left to right, one operator at a time.
///
/// Consecutive operands under the same operator collect into a run that is
/// built as a balanced tree; only a change of operator stacks a new level on
/// top of what came before. The result equals the left-associative fold.
struct Chain {
    op: Option<Op>,
    run: Vec<Sub>,
    /// Where the latest operand started, for error reporting.
    position: usize,
}

impl Chain {
    fn new(first: Sub, position: usize) -> Self {
        Chain {
            op: None,
            run: vec![first],
            position,
        }
    }

    fn push(&mut self, op: Op, operand: Sub, position: usize) -> Result<(), SyntaxError> {
        if self.op.is_some_and(|current| current != op) {
            let collapsed = self.collapse()?;
            self.run.push(collapsed);
        }
        self.op = Some(op);
        self.run.push(operand);
        self.position = position;
        Ok(())
    }

    fn collapse(&mut self) -> Result<Sub, SyntaxError> {
        let run = std::mem::take(&mut self.run);
        let sub = balance(self.op.unwrap_or(Op::Or), run).ok_or(SyntaxError::UnexpectedEnd)?;
        if sub.depth > MAX_DEPTH {
            return Err(SyntaxError::NestingTooDeep {
                position: self.position,
            });
        }
        Ok(sub)
    }

    fn finish(mut self) -> Result<Sub, SyntaxError> {
        self.collapse()
    }
}

/// Balanced tree over `run`, operands kept in order. `None` only when empty.
fn balance(op: Op, mut run: Vec<Sub>) -> Option<Sub> {
    if run.len() <= 1 {
        return run.pop();
    }
    let right = run.split_off(run.len().div_ceil(2));
    let left = balance(op, run)?;
    let right = balance(op, right)?;
    Some(Sub {
        depth: left.depth.max(right.depth) + 1,
        node: op.join(left.node, right.node),
    })
}

/// Operator implied by writing `right` next to its left neighbour.
fn adjacency(right: &QueryNode) -> Op {
    match right {
        QueryNode::Not { .. } => Op::And,
        _ => Op::Or,
    }
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Position of the next token, or of the last one at the end.
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(0, |t| t.position)
    }

    fn parse_query(&mut self) -> Result<QueryNode, SyntaxError> {
        let position = self.position();
        let mut chain = Chain::new(self.parse_or()?, position);

        // Anything left over can only start with ')': parse_and consumes every
        // other operand start and parse_or every OR.
        while !self.at_end() {
            if let Some(Token {
                kind: TokenKind::RParen,
                position,
            }) = self.tokens.get(self.pos).cloned()
            {
                self.errors.push(SyntaxError::UnmatchedCloseParen { position });
                self.pos += 1;
                continue;
            }
            let position = self.position();
            let rest = self.parse_or()?;
            chain.push(adjacency(&rest.node), rest, position)?;
        }

        Ok(chain.finish()?.node)
    }

    fn parse_or(&mut self) -> Result<Sub, SyntaxError> {
        let position = self.position();
        let mut chain = Chain::new(self.parse_and()?, position);
        while matches!(self.peek(), Some(TokenKind::Or)) {
            self.advance();
            let position = self.position();
            let right = self.parse_and()?;
            chain.push(Op::Or, right, position)?;
        }
        chain.finish()
    }

    fn parse_and(&mut self) -> Result<Sub, SyntaxError> {
        let position = self.position();
        let mut chain = Chain::new(self.parse_not()?, position);
        loop {
            let position = self.position();
            match self.peek() {
                Some(TokenKind::And) => {
                    self.advance();
                    let position = self.position();
                    let right = self.parse_not()?;
                    chain.push(Op::And, right, position)?;
                }
                // No operator: next token opens another operand.
                Some(kind) if kind.starts_operand() => {
                    let right = self.parse_not()?;
                    chain.push(adjacency(&right.node), right, position)?;
                }
                _ => break,
            }
        }
        chain.finish()
    }

    fn parse_not(&mut self) -> Result<Sub, SyntaxError> {
        if matches!(self.peek(), Some(TokenKind::Not)) {
            let position = self.position();
            self.advance();
            let operand = self.parse_primary()?;
            if operand.depth >= MAX_DEPTH {
                return Err(SyntaxError::NestingTooDeep { position });
            }
            return Ok(Sub {
                node: QueryNode::not(operand.node),
                depth: operand.depth + 1,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Sub, SyntaxError> {
        let Some(token) = self.advance() else {
            return Err(SyntaxError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::LParen => {
                if self.nesting >= MAX_DEPTH {
                    return Err(SyntaxError::NestingTooDeep {
                        position: token.position,
                    });
                }
                self.nesting += 1;
                let inner = self.parse_or();
                self.nesting -= 1;
                let inner = inner?;

                if matches!(self.peek(), Some(TokenKind::RParen)) {
                    self.advance();
                } else {
                    self.errors.push(SyntaxError::UnclosedGroup {
                        position: token.position,
                    });
                }
                Ok(inner)
            }
            TokenKind::Field(name) => {
                let value = match self.peek() {
                    Some(
                        TokenKind::Term(_)
                        | TokenKind::Phrase(_)
                        | TokenKind::Wildcard(_)
                        | TokenKind::Range { .. },
                    ) => self.advance().map(|t| leaf(t.kind)),
                    _ => None,
                };
                match value.flatten() {
                    Some(value) => Ok(Sub {
                        node: QueryNode::field(name, value),
                        depth: 2,
                    }),
                    None => Err(SyntaxError::MissingFieldValue {
                        field: name,
                        position: token.position,
                    }),
                }
            }
            kind @ (TokenKind::Term(_)
            | TokenKind::Phrase(_)
            | TokenKind::Wildcard(_)
            | TokenKind::Range { .. }) => leaf(kind).map(Sub::leaf).ok_or(SyntaxError::UnexpectedEnd),
            other => Err(SyntaxError::UnexpectedToken {
                found: other.describe(),
                position: token.position,
            }),
        }
    }
}

/// Terminal token to leaf node; `None` for anything that isn't a terminal.
fn leaf(kind: TokenKind) -> Option<QueryNode> {
    match kind {
        TokenKind::Term(value) => Some(QueryNode::Term { value }),
        TokenKind::Phrase(value) => Some(QueryNode::Phrase { value }),
        TokenKind::Wildcard(pattern) => Some(QueryNode::Wildcard { pattern }),
        TokenKind::Range { from, to } => Some(QueryNode::Range { from, to }),
        _ => None,
    }
}

/// Parse a raw query. Never fails: see the module docs for the fallback.
pub fn parse(raw: &str) -> ParseOutcome {
    let tokens = tokenize_query(raw);
    if tokens.is_empty() {
        return ParseOutcome {
            ast: QueryNode::term(raw.trim()),
            errors: vec![SyntaxError::EmptyQuery],
        };
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
        errors: Vec::new(),
    };

    match parser.parse_query() {
        Ok(ast) => ParseOutcome {
            ast,
            errors: parser.errors,
        },
        Err(fatal) => {
            tracing::warn!(query = raw, error = %fatal, "query syntax error, falling back to raw term");
            let mut errors = parser.errors;
            errors.push(fatal);
            ParseOutcome {
                ast: QueryNode::term(raw.trim()),
                errors,
            }
        }
    }
}

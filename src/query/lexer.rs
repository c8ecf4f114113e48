// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query lexer.
//!
//! Single left-to-right pass over the characters; the first rule that matches
//! at the cursor wins:
//!
//! 1. `"..."` phrase (`\"` and `\\` escapes; an unterminated quote runs to end)
//! 2. `(` / `)`
//! 3. `ident:` field prefix (no space before the colon)
//! 4. `[a TO b]` range (`TO` case-insensitive)
//! 5. maximal run of non-space, non-paren chars: `AND`/`OR`/`NOT` in any case,
//!    else wildcard if it has `*` or `?`, else a plain term
//!
//! The lexer never fails. Anything odd becomes a term and the parser decides.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Term(String),
    Phrase(String),
    Wildcard(String),
    /// Field name, colon consumed.
    Field(String),
    Range { from: String, to: String },
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl TokenKind {
    /// Can this token begin a `NotExpr`?
    pub fn starts_operand(&self) -> bool {
        !matches!(self, TokenKind::And | TokenKind::Or | TokenKind::RParen)
    }

    /// Short human-readable name for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Term(v) | TokenKind::Wildcard(v) => v.clone(),
            TokenKind::Phrase(v) => format!("\"{}\"", v),
            TokenKind::Field(name) => format!("{}:", name),
            TokenKind::Range { from, to } => format!("[{} TO {}]", from, to),
            TokenKind::And => "AND".to_string(),
            TokenKind::Or => "OR".to_string(),
            TokenKind::Not => "NOT".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Char offset of the token's first character in the raw query.
    pub position: usize,
}

#[inline]
fn is_paren(c: char) -> bool {
    c == '(' || c == ')'
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Turn a raw query into tokens.
pub fn tokenize_query(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let position = i;
        let kind = if c == '"' {
            let (value, next) = lex_phrase(&chars, i + 1);
            i = next;
            TokenKind::Phrase(value)
        } else if c == '(' {
            i += 1;
            TokenKind::LParen
        } else if c == ')' {
            i += 1;
            TokenKind::RParen
        } else if let Some((name, next)) = lex_field(&chars, i) {
            i = next;
            TokenKind::Field(name)
        } else if let Some((from, to, next)) = lex_range(&chars, i) {
            i = next;
            TokenKind::Range { from, to }
        } else {
            let start = i;
            while i < chars.len() && !chars[i].is_whitespace() && !is_paren(chars[i]) {
                i += 1;
            }
            classify_word(chars[start..i].iter().collect())
        };

        tokens.push(Token { kind, position });
    }

    tokens
}

/// Read phrase content starting just after the opening quote.
/// Returns the unescaped text and the index after the closing quote.
fn lex_phrase(chars: &[char], mut i: usize) -> (String, usize) {
    let mut value = String::new();
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                value.push(chars[i + 1]);
                i += 2;
            }
            '"' => return (value, i + 1),
            c => {
                value.push(c);
                i += 1;
            }
        }
    }
    // Unterminated: everything to the end is the phrase.
    (value, i)
}

/// `ident:` with the colon directly after the identifier.
fn lex_field(chars: &[char], start: usize) -> Option<(String, usize)> {
    if !is_ident_start(chars[start]) {
        return None;
    }
    let mut i = start + 1;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    if chars.get(i) == Some(&':') {
        Some((chars[start..i].iter().collect(), i + 1))
    } else {
        None
    }
}

/// `[from TO to]`. Bounds are single whitespace-free words.
fn lex_range(chars: &[char], start: usize) -> Option<(String, String, usize)> {
    if chars[start] != '[' {
        return None;
    }
    let mut i = start + 1;

    let skip_ws = |i: &mut usize| {
        while *i < chars.len() && chars[*i].is_whitespace() {
            *i += 1;
        }
    };
    let read_word = |i: &mut usize| -> String {
        let begin = *i;
        while *i < chars.len() && !chars[*i].is_whitespace() && chars[*i] != ']' {
            *i += 1;
        }
        chars[begin..*i].iter().collect()
    };

    skip_ws(&mut i);
    let from = read_word(&mut i);
    if from.is_empty() || !chars.get(i).is_some_and(|c| c.is_whitespace()) {
        return None;
    }
    skip_ws(&mut i);
    let keyword = read_word(&mut i);
    if !keyword.eq_ignore_ascii_case("to") || !chars.get(i).is_some_and(|c| c.is_whitespace()) {
        return None;
    }
    skip_ws(&mut i);
    let to = read_word(&mut i);
    if to.is_empty() {
        return None;
    }
    skip_ws(&mut i);
    if chars.get(i) != Some(&']') {
        return None;
    }
    Some((from, to, i + 1))
}

fn classify_word(word: String) -> TokenKind {
    if word.eq_ignore_ascii_case("and") {
        TokenKind::And
    } else if word.eq_ignore_ascii_case("or") {
        TokenKind::Or
    } else if word.eq_ignore_ascii_case("not") {
        TokenKind::Not
    } else if word.contains(['*', '?']) {
        TokenKind::Wildcard(word)
    } else {
        TokenKind::Term(word)
    }
}

//! Query language through the public API: tokens, trees, canonical text.

use kbsearch::query::lexer::{tokenize_query, TokenKind};
use kbsearch::{parse, QueryNode, SyntaxError};

#[test]
fn test_lexer_priority() {
    let kinds: Vec<TokenKind> = tokenize_query(r#"tag:x "a b" (c) [1 TO 2] d* OR e"#)
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Field("tag".to_string()),
            TokenKind::Term("x".to_string()),
            TokenKind::Phrase("a b".to_string()),
            TokenKind::LParen,
            TokenKind::Term("c".to_string()),
            TokenKind::RParen,
            TokenKind::Range {
                from: "1".to_string(),
                to: "2".to_string()
            },
            TokenKind::Wildcard("d*".to_string()),
            TokenKind::Or,
            TokenKind::Term("e".to_string()),
        ]
    );
}

#[test]
fn test_canonical_display() {
    let cases = [
        ("a AND b", "(a AND b)"),
        ("a OR b AND c", "(a OR (b AND c))"),
        ("deep NOT learning", "(deep AND NOT learning)"),
        ("deep learning", "(deep OR learning)"),
        (r#"tag:"x y""#, r#"tag:"x y""#),
        ("date:[1 TO 9]", "date:[1 TO 9]"),
        ("NOT (a OR b)", "NOT (a OR b)"),
    ];
    for (raw, canonical) in cases {
        assert_eq!(parse(raw).ast.to_string(), canonical, "{:?}", raw);
    }
}

#[test]
fn test_canonical_form_reparses_to_same_tree() {
    for raw in ["a AND (b OR c)", "x OR y OR z", "NOT a AND b", r#"tag:"p q" OR r*"#] {
        let first = parse(raw).ast;
        let second = parse(&first.to_string()).ast;
        assert_eq!(first, second, "{:?}", raw);
    }
}

#[test]
fn test_errors_carry_positions() {
    let outcome = parse("a OR ) b");
    assert!(outcome.has_error());
    assert_eq!(outcome.ast, QueryNode::term("a OR ) b"));
    assert_eq!(
        outcome.errors,
        vec![SyntaxError::UnexpectedToken {
            found: ")".to_string(),
            position: 5
        }]
    );

    let outcome = parse("x (y");
    assert_eq!(outcome.errors, vec![SyntaxError::UnclosedGroup { position: 2 }]);
}

#[test]
fn test_syntax_errors_serialize_with_kind() {
    let json = serde_json::to_value(SyntaxError::UnclosedGroup { position: 3 }).unwrap();
    assert_eq!(json["kind"], "unclosedGroup");
    assert_eq!(json["position"], 3);
}

#[test]
fn test_ast_serializes_tagged() {
    let json = serde_json::to_value(parse("tag:x").ast).unwrap();
    assert_eq!(json["type"], "field");
    assert_eq!(json["name"], "tag");
    assert_eq!(json["value"]["type"], "term");
}

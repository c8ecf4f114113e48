//! The parser is total: every input produces a tree.

use kbsearch::{parse, QueryNode, SearchOptions, SyntaxError};
use proptest::prelude::*;

/// Token soup biased toward the query language's own syntax.
fn query_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("AND".to_string()),
        Just("OR".to_string()),
        Just("NOT".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("\"".to_string()),
        Just("tag:".to_string()),
        Just("[a TO b]".to_string()),
        Just("*".to_string()),
        prop::string::string_regex("[a-z?*]{1,5}").unwrap(),
    ];
    prop::collection::vec(piece, 0..12).prop_map(|p| p.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_parse_never_panics(raw in "\\PC{0,60}") {
        let _ = parse(&raw);
    }

    /// A fatal error always falls back to the raw, trimmed text as one term.
    #[test]
    fn prop_fallback_is_raw_term(raw in query_strategy()) {
        let outcome = parse(&raw);
        let fatal = outcome.errors.iter().any(|err| {
            !matches!(
                err,
                SyntaxError::UnclosedGroup { .. } | SyntaxError::UnmatchedCloseParen { .. }
            )
        });
        if fatal {
            prop_assert_eq!(&outcome.ast, &QueryNode::term(raw.trim()));
        }
        let engine = super::common::scenario_engine();
        let outcome = engine.search_detailed(&raw, &SearchOptions::default());
        prop_assert!(outcome.results.len() <= 2);
    }

    /// Well-formed conjunctions of plain words parse without errors, and
    /// the tree keeps the words in query order.
    #[test]
    fn prop_plain_words_parse_cleanly(words in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let words: Vec<String> = words
            .into_iter()
            .filter(|w| !matches!(w.as_str(), "and" | "or" | "not"))
            .collect();
        prop_assume!(!words.is_empty());
        let outcome = parse(&words.join(" AND "));
        prop_assert!(!outcome.has_error());
        let printed = outcome.ast.to_string();
        let leaves: Vec<&str> = printed
            .split(|c: char| c == '(' || c == ')' || c == ' ')
            .filter(|piece| !piece.is_empty() && *piece != "AND")
            .collect();
        prop_assert_eq!(leaves, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

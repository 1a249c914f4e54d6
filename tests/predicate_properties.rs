//! Property-based tests for the statement-terminator predicates
//!
//! These tests use proptest to check the predicates against a straightforward model over random
//! token streams built from layout tokens, block comments with and without line breaks, identifiers
//! and closing braces.

use abla::lexer::TokenKind;
use abla::predicates::{
    self, Fallthrough, Predicates, TerminatorConfig, contains_line_break, has_preceding_terminator,
    is_at_closing_delimiter,
};
use abla::stream::TokenStream;
use proptest::prelude::*;

const ATOMS: &[(TokenKind, &str)] = &[
    (TokenKind::Whitespace, " "),
    (TokenKind::Whitespace, "\t"),
    (TokenKind::NL, "\n"),
    (TokenKind::NL, "\r\n"),
    (TokenKind::LineComment, "// note"),
    (TokenKind::DelimitedComment, "/* inline */"),
    (TokenKind::DelimitedComment, "/* a\nb */"),
    (TokenKind::DelimitedComment, "/*\r*/"),
    (TokenKind::Identifier, "x"),
    (TokenKind::Semicolon, ";"),
    (TokenKind::RCurl, "}"),
    (TokenKind::Eof, ""),
];

fn token_stream() -> impl Strategy<Value = TokenStream> {
    prop::collection::vec(prop::sample::select(ATOMS), 0..24)
        .prop_map(|atoms| atoms.into_iter().collect())
}

fn strict() -> TerminatorConfig<TokenKind, abla::lexer::Channel> {
    TerminatorConfig::abla().with_fallthrough(Fallthrough::Reject)
}

/// Reference answer for the strict predicate: scan the hidden run before `index` for a line break.
fn model_strict(stream: &TokenStream, index: usize) -> bool {
    let preceding = &stream.tokens()[..index.min(stream.len())];
    let mut reached_start = true;
    for token in preceding.iter().rev() {
        if token.kind == TokenKind::NL
            || (token.kind == TokenKind::DelimitedComment && contains_line_break(&token.text))
        {
            return true;
        }
        if !token.is_hidden() {
            reached_start = false;
            break;
        }
    }
    reached_start
}

proptest! {
    /// Every index, including out-of-range ones, yields an answer without faulting.
    #[test]
    fn prop_any_index_is_defined(stream in token_stream(), extra in 0usize..4) {
        for index in 0..=stream.len() + extra {
            let _ = has_preceding_terminator(&stream, index, &TerminatorConfig::abla());
            let _ = has_preceding_terminator(&stream, index, &strict());
            let _ = is_at_closing_delimiter(&stream, index, &TerminatorConfig::abla());
        }
        prop_assert!(has_preceding_terminator(&stream, 0, &TerminatorConfig::abla()));
        prop_assert!(has_preceding_terminator(&stream, 0, &strict()));
    }

    /// The default fallthrough answers `true` everywhere.
    #[test]
    fn prop_accepting_fallthrough_is_always_true(stream in token_stream()) {
        for index in 0..stream.len() {
            prop_assert!(has_preceding_terminator(&stream, index, &TerminatorConfig::abla()));
        }
    }

    /// The strict predicate matches the model: a line break in the preceding hidden run, or nothing
    /// visible before the token at all.
    #[test]
    fn prop_strict_matches_model(stream in token_stream()) {
        for index in 0..stream.len() {
            prop_assert_eq!(
                has_preceding_terminator(&stream, index, &strict()),
                model_strict(&stream, index),
                "index {}",
                index
            );
        }
    }

    /// A line break anywhere in the hidden run is found regardless of what surrounds it.
    #[test]
    fn prop_line_break_in_hidden_run_is_found(
        before in prop::collection::vec(prop::sample::select(ATOMS), 0..8),
        layout in prop::collection::vec(prop::sample::select(&ATOMS[..2]), 0..4),
        after in prop::collection::vec(prop::sample::select(&ATOMS[4..6]), 0..4),
    ) {
        let mut stream: TokenStream = before.into_iter().collect();
        for (kind, text) in layout {
            stream.push(kind, text);
        }
        stream.push(TokenKind::NL, "\n");
        for (kind, text) in after {
            stream.push(kind, text);
        }
        let current = stream.push(TokenKind::Identifier, "y");
        prop_assert!(has_preceding_terminator(&stream, current, &strict()));
        prop_assert!(predicates::scan_preceding(&stream, current, &strict()).found_line_break());
    }

    /// The closing predicate is exactly a kind check on the current token.
    #[test]
    fn prop_closing_delimiter_is_kind_check(stream in token_stream()) {
        for index in 0..stream.len() + 2 {
            let expected = stream.get(index).is_some_and(|t| t.kind == TokenKind::RCurl);
            prop_assert_eq!(is_at_closing_delimiter(&stream, index, &TerminatorConfig::abla()), expected);
        }
    }

    /// Repeated calls agree and leave the stream untouched; the bound form and slices agree with
    /// the free functions.
    #[test]
    fn prop_predicates_are_pure(stream in token_stream()) {
        let snapshot = stream.clone();
        let bound = Predicates::new(&stream, strict());
        for index in 0..stream.len() {
            let first = has_preceding_terminator(&stream, index, &strict());
            prop_assert_eq!(first, has_preceding_terminator(&stream, index, &strict()));
            prop_assert_eq!(first, bound.has_preceding_terminator(index));
            prop_assert_eq!(first, has_preceding_terminator(stream.tokens(), index, &strict()));
            prop_assert_eq!(
                is_at_closing_delimiter(&stream, index, &strict()),
                bound.is_at_closing_delimiter(index)
            );
        }
        prop_assert_eq!(stream, snapshot);
    }
}

#[test]
fn test_scenarios() {
    let config = TerminatorConfig::abla();

    let stream: TokenStream = [(TokenKind::Identifier, "x"), (TokenKind::NL, "\n"), (TokenKind::RCurl, "}")]
        .into_iter()
        .collect();
    assert!(has_preceding_terminator(&stream, 2, &config));
    assert!(is_at_closing_delimiter(&stream, 2, &config));

    let stream: TokenStream = [
        (TokenKind::Identifier, "x"),
        (TokenKind::Whitespace, " "),
        (TokenKind::Identifier, "y"),
    ]
    .into_iter()
    .collect();
    assert!(has_preceding_terminator(&stream, 2, &config));
    assert!(!has_preceding_terminator(&stream, 2, &strict()));
    assert!(!is_at_closing_delimiter(&stream, 2, &config));

    let stream: TokenStream = [
        (TokenKind::Identifier, "x"),
        (TokenKind::DelimitedComment, "/* a\nb */"),
        (TokenKind::Identifier, "y"),
    ]
    .into_iter()
    .collect();
    assert!(has_preceding_terminator(&stream, 2, &config));
    assert!(has_preceding_terminator(&stream, 2, &strict()));
}

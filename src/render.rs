//! Plain-text renderings shared by the CLI and its tests.
//!
//! Everything here returns a `String` so the output can be snapshot-tested without capturing stdout.

use abla_syntax::diagnostics::SyntaxError;
use abla_syntax::lexer::{Channel, TokenKind};
use abla_syntax::predicates::{Lookback, Predicates, TerminatorConfig};
use abla_syntax::stream::TokenStream;
use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, Report};

/// One line per token: `index: channel KIND "text"`.
///
/// Hidden-channel tokens are skipped unless `include_hidden` is set.
pub fn token_dump(stream: &TokenStream, include_hidden: bool) -> String {
    stream
        .iter()
        .filter(|token| include_hidden || !token.is_hidden())
        .map(|token| format!("{}: {} {} {:?}", token.index, token.channel, token.kind.name(), token.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per default-channel token with both predicate answers and where the lookback stopped.
pub fn terminator_report(stream: &TokenStream, config: TerminatorConfig<TokenKind, Channel>) -> String {
    let predicates = Predicates::new(stream, config);
    stream
        .visible()
        .map(|token| {
            format!(
                "{}: {} {:?} terminator={} closing={} ({})",
                token.index,
                token.kind.name(),
                token.text,
                predicates.has_preceding_terminator(token.index),
                predicates.is_at_closing_delimiter(token.index),
                describe_lookback(predicates.scan_preceding(token.index)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_lookback(lookback: Lookback) -> String {
    match lookback {
        Lookback::LineBreak { index } => format!("line break at {}", index),
        Lookback::MultiLineComment { index } => format!("multi-line comment at {}", index),
        Lookback::VisibleToken { index } => format!("follows {}", index),
        Lookback::StartOfStream => "start of stream".to_string(),
    }
}

/// Render syntax errors as labelled source excerpts, without colors.
pub fn format_errors(file_name: &str, source: &str, errors: &[SyntaxError]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for err in errors {
        let report = Report::new(err.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
        if handler.render_report(&mut out, &*report).is_err() {
            // Fall back to the one-line form if the excerpt cannot be rendered.
            out.push_str(&format!("{}\n", err));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use abla_syntax::lexer::lex;

    #[test]
    fn test_token_dump_filters_hidden() {
        let tokens = lex("a b").unwrap();
        assert_eq!(token_dump(&tokens, false).lines().count(), 3);
        assert_eq!(token_dump(&tokens, true).lines().count(), 4);
    }

    #[test]
    fn test_format_errors_names_file_and_message() {
        let source = "val = 1";
        let tokens = lex(source).unwrap();
        let errors = abla_syntax::parser::parse(&tokens).unwrap_err();
        let rendered = format_errors("main.abla", source, &errors);
        assert!(rendered.contains("main.abla"), "got: {}", rendered);
        assert!(rendered.contains("Expected identifier, found '='"), "got: {}", rendered);
    }
}

//! Lexer for the Abla programming language
//!
//! Produces a fully materialized [`TokenStream`] in which every byte of the source belongs to exactly
//! one token:
//! - Keywords, identifiers, integer and string literals, operators and punctuation on the default
//!   channel
//! - Whitespace, line breaks (`NL`) and comments on the hidden channel, where the terminator
//!   predicates can still find them
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Channel, Token)
//! - `literals` - String and integer literal scanning

mod literals;
pub mod tokens;

pub use literals::decode_string_literal;
pub use tokens::{Channel, Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use crate::keywords;
use crate::stream::TokenStream;

/// Lexer for Abla source code.
///
/// ## Notes
/// - Errors are collected and scanning continues, so one pass reports every lexical problem.
/// - The stream always ends with an `Eof` token with empty text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    stream: TokenStream,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            stream: TokenStream::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns the token stream on success, or every error found on failure.
    pub fn tokenize(mut self) -> Result<TokenStream, Vec<SyntaxError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.stream.push(TokenKind::Eof, "");

        if self.errors.is_empty() {
            Ok(self.stream)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.current_pos];
        self.stream.push(kind, text);
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(SyntaxError::lexical(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Layout
            ' ' | '\t' | '\u{000C}' => {
                self.advance_while(|c| matches!(c, ' ' | '\t' | '\u{000C}'));
                self.add_token(TokenKind::Whitespace, start);
            }
            '\n' => self.add_token(TokenKind::NL, start),
            '\r' => {
                self.match_char('\n');
                self.add_token(TokenKind::NL, start);
            }

            // Comments and division
            '/' => {
                if self.match_char('/') {
                    self.advance_while(|c| c != '\n' && c != '\r');
                    self.add_token(TokenKind::LineComment, start);
                } else if self.match_char('*') {
                    self.scan_delimited_comment(start);
                } else {
                    self.add_token(TokenKind::Div, start);
                }
            }

            // Delimiters
            '(' => self.add_token(TokenKind::LParen, start),
            ')' => self.add_token(TokenKind::RParen, start),
            '{' => self.add_token(TokenKind::LCurl, start),
            '}' => self.add_token(TokenKind::RCurl, start),
            '[' => self.add_token(TokenKind::LSquare, start),
            ']' => self.add_token(TokenKind::RSquare, start),

            // Punctuation
            ',' => self.add_token(TokenKind::Comma, start),
            '.' => self.add_token(TokenKind::Dot, start),
            ':' => self.add_token(TokenKind::Colon, start),
            ';' => self.add_token(TokenKind::Semicolon, start),
            '#' => self.add_token(TokenKind::Hash, start),
            '?' => self.add_token(TokenKind::Question, start),
            '@' => self.add_token(TokenKind::At, start),

            // Operators
            '+' => self.add_token(TokenKind::Plus, start),
            '*' => self.add_token(TokenKind::Mul, start),
            '-' => {
                let kind = if self.match_char('>') { TokenKind::Arrow } else { TokenKind::Minus };
                self.add_token(kind, start);
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::Equals } else { TokenKind::Assign };
                self.add_token(kind, start);
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::Lte } else { TokenKind::LAngle };
                self.add_token(kind, start);
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::Gte } else { TokenKind::RAngle };
                self.add_token(kind, start);
            }
            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::NotEquals, start);
                } else {
                    self.error("Unexpected character '!'", start);
                }
            }

            // Literals
            '"' => self.scan_string(start),
            '0'..='9' => self.scan_integer(start, c),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.error(format!("Unexpected character '{}'", c), start),
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Scan the rest of a `/* ... */` comment. Comments nest.
    fn scan_delimited_comment(&mut self, start: usize) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('*') if self.match_char('/') => depth -= 1,
                Some('/') if self.match_char('*') => depth += 1,
                Some(_) => {}
                None => {
                    self.error("Unterminated comment", start);
                    break;
                }
            }
        }
        self.add_token(TokenKind::DelimitedComment, start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        self.advance_while(is_ident_continue);
        let spelling = &self.source[start..self.current_pos];
        let kind = match keywords::from_str(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Identifier,
        };
        self.add_token(kind, start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<TokenStream, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().iter().map(|t| t.kind).collect()
    }

    fn visible_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().visible().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap();
            assert_eq!(tokens.len(), 2, "expected token + EOF for {:?}", k.id);
            assert!(tokens.get(0).unwrap().kind.is_keyword(k.id));
        }
    }

    #[test]
    fn test_declaration_keywords() {
        assert_eq!(
            visible_kinds("fun class val var"),
            vec![
                TokenKind::Keyword(KeywordId::Fun),
                TokenKind::Keyword(KeywordId::Class),
                TokenKind::Keyword(KeywordId::Val),
                TokenKind::Keyword(KeywordId::Var),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_and_punctuation() {
        assert_eq!(
            visible_kinds("= == != < > <= >= + - * / -> # ? @ . , : ;"),
            vec![
                TokenKind::Assign,
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::LAngle,
                TokenKind::RAngle,
                TokenKind::Lte,
                TokenKind::Gte,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Arrow,
                TokenKind::Hash,
                TokenKind::Question,
                TokenKind::At,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_layout_tokens_are_hidden() {
        let tokens = lex("x \t// note\r\n/* a\nb */y").unwrap();
        let summary: Vec<(TokenKind, Channel, &str)> =
            tokens.iter().map(|t| (t.kind, t.channel, t.text.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Identifier, Channel::Default, "x"),
                (TokenKind::Whitespace, Channel::Hidden, " \t"),
                (TokenKind::LineComment, Channel::Hidden, "// note"),
                (TokenKind::NL, Channel::Hidden, "\r\n"),
                (TokenKind::DelimitedComment, Channel::Hidden, "/* a\nb */"),
                (TokenKind::Identifier, Channel::Default, "y"),
                (TokenKind::Eof, Channel::Default, ""),
            ]
        );
    }

    #[test]
    fn test_one_nl_token_per_line_break() {
        let nl = kinds("a\n\n\rb").iter().filter(|k| **k == TokenKind::NL).count();
        assert_eq!(nl, 3);
    }

    #[test]
    fn test_nested_delimited_comment() {
        let tokens = lex("/* outer /* inner */ still outer */x").unwrap();
        assert_eq!(tokens.get(0).unwrap().kind, TokenKind::DelimitedComment);
        assert_eq!(tokens.get(0).unwrap().text, "/* outer /* inner */ still outer */");
        assert_eq!(tokens.get(1).unwrap().text, "x");
    }

    #[test]
    fn test_source_round_trips_through_token_text() {
        let source = "fun main() {\n    val x = 0x1F /* c */ + 2\n    print(\"hi $x\\n\") // done\n}\n";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens.source_text(), source);
        assert_eq!(tokens.end_offset(), source.len());
    }

    #[test]
    fn test_positions() {
        let tokens = lex("a\n  bb").unwrap();
        let bb = tokens.iter().find(|t| t.text == "bb").unwrap();
        assert_eq!((bb.start.line, bb.start.column), (2, 3));
        assert_eq!(bb.span, Span::new(4, 6));
    }

    #[test]
    fn test_unterminated_comment() {
        let errors = lex("x /* never closed").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unterminated comment"));
    }

    #[test]
    fn test_unexpected_character() {
        let errors = lex("val π = 1").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unexpected character"));

        let errors = lex("!x").unwrap_err();
        assert!(errors[0].message.contains("'!'"));
    }

    #[test]
    fn test_errors_are_collected() {
        let errors = lex("` ~").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    proptest::proptest! {
        #[test]
        fn prop_lexed_tokens_cover_source(source in "[a-z0-9_ \\t\\r\\n(){}\\[\\];:.,=<>+*/#@?\"-]{0,48}") {
            if let Ok(tokens) = lex(&source) {
                proptest::prop_assert_eq!(tokens.source_text(), source.clone());
                proptest::prop_assert_eq!(tokens.tokens().last().map(|t| t.kind), Some(TokenKind::Eof));
                for token in tokens.iter() {
                    proptest::prop_assert_eq!(token.is_hidden(), token.kind.default_channel() == Channel::Hidden);
                }
            }
        }
    }
}

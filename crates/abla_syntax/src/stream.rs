//! Token stream storage and the read-only access traits used by the terminator predicates.
//!
//! [`TokenStream`] is an append-only sequence of [`Token`]s that keeps hidden-channel tokens at their
//! original positions. The predicates in [`crate::predicates`] do not depend on it directly: they are
//! written against [`TokenSource`] / [`TokenView`], so any indexed token container (including a plain
//! slice of some other lexer's tokens) can be inspected.
//!
//! ## Examples
//! ```rust
//! use abla_syntax::lexer::{Channel, TokenKind};
//! use abla_syntax::stream::TokenStream;
//!
//! let stream: TokenStream = [
//!     (TokenKind::Identifier, "x"),
//!     (TokenKind::NL, "\n"),
//!     (TokenKind::RCurl, "}"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(stream.len(), 3);
//! assert_eq!(stream.get(1).map(|t| t.channel), Some(Channel::Hidden));
//! assert_eq!(stream.get(2).map(|t| t.start.line), Some(2));
//! ```

use crate::ast::{Point, Span};
use crate::lexer::{Channel, Token, TokenKind};

// ============================================================================
// Access traits
// ============================================================================

/// Read-only view of a single token, as needed by the terminator predicates.
pub trait TokenView {
    /// Token type tag.
    type Kind: Copy + Eq;
    /// Channel tag.
    type Channel: Copy + Eq;

    fn kind(&self) -> Self::Kind;
    fn channel(&self) -> Self::Channel;
    /// Raw source text of the token.
    fn text(&self) -> &str;
}

/// Indexed, random-access token container.
///
/// ## Notes
/// - Indices follow stream order; `get` returns `None` past the end instead of panicking.
pub trait TokenSource {
    type Token: TokenView;

    fn get(&self, index: usize) -> Option<&Self::Token>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenView for Token {
    type Kind = TokenKind;
    type Channel = Channel;

    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn channel(&self) -> Channel {
        self.channel
    }

    fn text(&self) -> &str {
        &self.text
    }
}

impl<T: TokenView> TokenSource for [T] {
    type Token = T;

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: TokenView> TokenSource for Vec<T> {
    type Token = T;

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

// ============================================================================
// TokenStream
// ============================================================================

/// Append-only token sequence covering a source text.
///
/// ## Notes
/// - Spans and line/column positions are derived from the pushed text, so the concatenation of all
///   token texts reproduces the source.
/// - Tokens are never mutated or removed once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    offset: usize,
    point: Point,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token on its kind's default channel and return its index.
    pub fn push(&mut self, kind: TokenKind, text: &str) -> usize {
        self.push_on(kind, kind.default_channel(), text)
    }

    /// Append a token on an explicit channel and return its index.
    pub fn push_on(&mut self, kind: TokenKind, channel: Channel, text: &str) -> usize {
        let index = self.tokens.len();
        let span = Span::new(self.offset, self.offset + text.len());
        self.tokens
            .push(Token::new(kind, channel, text, span, index, self.point));
        self.offset = span.end;
        self.point = advance_point(self.point, text);
        index
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Tokens on the default channel, in stream order.
    pub fn visible(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.channel == Channel::Default)
    }

    /// Index of the first default-channel token at or after `from`.
    pub fn next_visible(&self, from: usize) -> Option<usize> {
        self.tokens
            .iter()
            .skip(from)
            .find(|t| t.channel == Channel::Default)
            .map(|t| t.index)
    }

    /// Reassemble the source text from the token texts.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Byte offset just past the last pushed token.
    pub fn end_offset(&self) -> usize {
        self.offset
    }
}

impl TokenSource for TokenStream {
    type Token = Token;

    fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl<'s> FromIterator<(TokenKind, &'s str)> for TokenStream {
    fn from_iter<I: IntoIterator<Item = (TokenKind, &'s str)>>(iter: I) -> Self {
        let mut stream = TokenStream::new();
        for (kind, text) in iter {
            stream.push(kind, text);
        }
        stream
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Advance a line/column position over `text`. `\r\n` counts as a single line break.
fn advance_point(mut point: Point, text: &str) -> Point {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                point.line += 1;
                point.column = 1;
            }
            _ => point.column += 1,
        }
    }
    point
}

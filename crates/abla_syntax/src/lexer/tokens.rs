//! Token types for the Abla lexer.
//!
//! Every token carries a kind tag, the channel it was emitted on, its raw source text, and its
//! position. Layout tokens (whitespace, line breaks, comments) are kept in the stream on the
//! [`Channel::Hidden`] channel: the parser never matches them, but the terminator predicates walk
//! back over them.
//!
//! ## Notes
//! - Keyword tokens carry a stable [`KeywordId`] from [`crate::keywords`].
//! - Literal values are not decoded here; the parser reads them from [`Token::text`].

use std::fmt;

use crate::ast::{Point, Span};
use crate::keywords::{self, KeywordId};

// ============================================================================
// CHANNELS
// ============================================================================

/// Token channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Matched by the grammar.
    #[default]
    Default,
    /// Kept in the stream for lookback, skipped by the grammar.
    Hidden,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Default => write!(f, "default"),
            Channel::Hidden => write!(f, "hidden"),
        }
    }
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Layout (hidden channel) ==========
    Whitespace,
    /// One line break: `\n`, `\r\n` or a lone `\r`.
    NL,
    /// `// ...` up to (not including) the line break.
    LineComment,
    /// `/* ... */`, possibly nested and possibly spanning lines.
    DelimitedComment,

    // ========== Identifiers and literals ==========
    Identifier,
    Keyword(KeywordId),
    IntegerLiteral,
    StringLiteral,

    // ========== Delimiters ==========
    LParen,
    RParen,
    LCurl,
    RCurl,
    LSquare,
    RSquare,

    // ========== Punctuation ==========
    Comma,
    Dot,
    Colon,
    Semicolon,
    Hash,
    Question,
    At,
    Arrow,

    // ========== Operators ==========
    Assign,
    Equals,
    NotEquals,
    LAngle,
    RAngle,
    Lte,
    Gte,
    Plus,
    Minus,
    Mul,
    Div,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Channel the lexer emits this kind on.
    pub fn default_channel(self) -> Channel {
        if self.is_layout() {
            Channel::Hidden
        } else {
            Channel::Default
        }
    }

    /// Return `true` for whitespace, line breaks and comments.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::NL | TokenKind::LineComment | TokenKind::DelimitedComment
        )
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if k == id)
    }

    /// Grammar-style display name.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WS",
            TokenKind::NL => "NL",
            TokenKind::LineComment => "LineComment",
            TokenKind::DelimitedComment => "DelimitedComment",
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword(id) => keywords::as_str(id),
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LCurl => "'{'",
            TokenKind::RCurl => "'}'",
            TokenKind::LSquare => "'['",
            TokenKind::RSquare => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Hash => "'#'",
            TokenKind::Question => "'?'",
            TokenKind::At => "'@'",
            TokenKind::Arrow => "'->'",
            TokenKind::Assign => "'='",
            TokenKind::Equals => "'=='",
            TokenKind::NotEquals => "'!='",
            TokenKind::LAngle => "'<'",
            TokenKind::RAngle => "'>'",
            TokenKind::Lte => "'<='",
            TokenKind::Gte => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A token with its kind, channel, raw text and location.
///
/// ## Notes
/// - Tokens are created once by [`crate::stream::TokenStream::push`] and never mutated afterwards.
/// - `index` is the token's position in its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub channel: Channel,
    pub text: String,
    pub span: Span,
    pub index: usize,
    pub start: Point,
}

impl Token {
    /// Construct a new token.
    pub fn new(
        kind: TokenKind,
        channel: Channel,
        text: impl Into<String>,
        span: Span,
        index: usize,
        start: Point,
    ) -> Self {
        Self {
            kind,
            channel,
            text: text.into(),
            span,
            index,
            start,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }
}

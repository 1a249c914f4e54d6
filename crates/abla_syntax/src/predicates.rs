//! Semantic predicates for layout-inferred statement terminators.
//!
//! Abla has no mandatory statement separator: a line break (or a `/* ... */` comment that spans one)
//! in front of a token ends the previous statement. Line breaks and comments live on the hidden
//! channel, so the grammar cannot see them; the parser instead asks two questions at its decision
//! points:
//!
//! - [`has_preceding_terminator`]: is there an implicit terminator right before the current token?
//! - [`is_at_closing_delimiter`]: is the current token the `}` that closes the enclosing block?
//!
//! Both are pure functions of a [`TokenSource`], an explicit token index and a [`TerminatorConfig`].
//! The config injects the token tags, so the same predicates work for any lexer that exposes its
//! tokens through [`TokenView`].
//!
//! ## Notes
//! - The backward walk inspects the hidden run in front of `index` and at most one visible token.
//! - What happens when the walk reaches a visible token without finding a terminator is selected by
//!   [`Fallthrough`]. The historical behaviour ([`Fallthrough::Accept`], the default) answers `true`
//!   there as well, which means the predicate can only ever return `true`. [`Fallthrough::Reject`]
//!   answers `false` and makes the predicate discriminate.
//! - Start of stream is always reported as terminator-present.
//!
//! ## Examples
//! ```rust
//! use abla_syntax::lexer::TokenKind;
//! use abla_syntax::predicates::{self, Fallthrough, TerminatorConfig};
//! use abla_syntax::stream::TokenStream;
//!
//! let stream: TokenStream = [
//!     (TokenKind::Identifier, "x"),
//!     (TokenKind::Whitespace, " "),
//!     (TokenKind::Identifier, "y"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let accept = TerminatorConfig::abla();
//! let reject = TerminatorConfig::abla().with_fallthrough(Fallthrough::Reject);
//! assert!(predicates::has_preceding_terminator(&stream, 2, &accept));
//! assert!(!predicates::has_preceding_terminator(&stream, 2, &reject));
//! assert!(!predicates::is_at_closing_delimiter(&stream, 2, &accept));
//! ```

use crate::lexer::{Channel, TokenKind};
use crate::stream::{TokenSource, TokenView};

// ============================================================================
// Configuration
// ============================================================================

/// Result of the backward walk when it reaches a visible, non-terminator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallthrough {
    /// Report a terminator anyway (historical behaviour).
    #[default]
    Accept,
    /// Report no terminator.
    Reject,
}

/// Token tags the predicates need from the surrounding lexer.
///
/// ## Notes
/// - `K` is the token-kind tag type and `C` the channel tag type of the inspected [`TokenView`].
/// - [`TerminatorConfig::abla`] binds the tags of this crate's lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminatorConfig<K, C> {
    /// Kind of a line-break token.
    pub line_break: K,
    /// Kind of a multi-line comment token; counts as a terminator only if its text contains a line break.
    pub block_comment: K,
    /// Kind of the token that closes a block.
    pub closing_delimiter: K,
    /// Channel whose tokens are skipped by the grammar.
    pub hidden_channel: C,
    /// Answer of [`has_preceding_terminator`] when the walk reaches a visible token.
    pub fallthrough: Fallthrough,
}

impl<K, C> TerminatorConfig<K, C> {
    /// Configuration with the given tags and the default [`Fallthrough::Accept`].
    pub fn new(line_break: K, block_comment: K, closing_delimiter: K, hidden_channel: C) -> Self {
        Self {
            line_break,
            block_comment,
            closing_delimiter,
            hidden_channel,
            fallthrough: Fallthrough::default(),
        }
    }

    /// Replace the fallthrough mode.
    pub fn with_fallthrough(mut self, fallthrough: Fallthrough) -> Self {
        self.fallthrough = fallthrough;
        self
    }
}

impl TerminatorConfig<TokenKind, Channel> {
    /// Configuration for the Abla lexer: `NL`, `DelimitedComment`, `}` and the hidden channel.
    pub fn abla() -> Self {
        Self::new(
            TokenKind::NL,
            TokenKind::DelimitedComment,
            TokenKind::RCurl,
            Channel::Hidden,
        )
    }
}

impl Default for TerminatorConfig<TokenKind, Channel> {
    fn default() -> Self {
        Self::abla()
    }
}

// ============================================================================
// Lookback
// ============================================================================

/// Why the backward walk from a token stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// A line-break token at `index`.
    LineBreak { index: usize },
    /// A multi-line comment containing a line break at `index`.
    MultiLineComment { index: usize },
    /// A visible token at `index` that is not a terminator.
    VisibleToken { index: usize },
    /// Nothing precedes the token.
    StartOfStream,
}

impl Lookback {
    /// Return `true` if the walk found an actual line break, independent of [`Fallthrough`].
    pub fn found_line_break(self) -> bool {
        matches!(self, Lookback::LineBreak { .. } | Lookback::MultiLineComment { .. })
    }

    /// Map the walk outcome to the predicate answer under `fallthrough`.
    pub fn is_terminator(self, fallthrough: Fallthrough) -> bool {
        match self {
            Lookback::LineBreak { .. } | Lookback::MultiLineComment { .. } | Lookback::StartOfStream => true,
            Lookback::VisibleToken { .. } => fallthrough == Fallthrough::Accept,
        }
    }
}

/// Return `true` if `text` contains a carriage return or a line feed.
pub fn contains_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Walk backward from the token before `index` and report where the walk stopped.
///
/// ## Parameters
/// - `source`: the full token stream, hidden tokens included.
/// - `index`: position of the current token. Indices past the end are treated as the end-of-stream
///   position, so the walk starts at the last token.
///
/// ## Notes
/// - A token stops the walk as a terminator if its kind is `line_break`, or if its kind is
///   `block_comment` and its text contains `\r` or `\n`. This check runs before the channel check,
///   so it holds for terminator tokens on any channel.
/// - Otherwise hidden tokens are skipped and the first visible token stops the walk.
pub fn scan_preceding<S, T>(source: &S, index: usize, config: &TerminatorConfig<T::Kind, T::Channel>) -> Lookback
where
    S: TokenSource<Token = T> + ?Sized,
    T: TokenView,
{
    let mut cursor = index.min(source.len());
    let outcome = loop {
        let Some(prev) = cursor.checked_sub(1) else {
            break Lookback::StartOfStream;
        };
        cursor = prev;
        let Some(token) = source.get(cursor) else {
            break Lookback::StartOfStream;
        };

        let kind = token.kind();
        if kind == config.line_break {
            break Lookback::LineBreak { index: cursor };
        }
        if kind == config.block_comment && contains_line_break(token.text()) {
            break Lookback::MultiLineComment { index: cursor };
        }
        if token.channel() != config.hidden_channel {
            break Lookback::VisibleToken { index: cursor };
        }
    };
    tracing::trace!(index, ?outcome, "terminator lookback");
    outcome
}

/// Return `true` if an implicit statement terminator precedes the token at `index`.
///
/// See [`scan_preceding`] for the walk and [`Lookback::is_terminator`] for the mapping to a boolean.
pub fn has_preceding_terminator<S, T>(source: &S, index: usize, config: &TerminatorConfig<T::Kind, T::Channel>) -> bool
where
    S: TokenSource<Token = T> + ?Sized,
    T: TokenView,
{
    scan_preceding(source, index, config).is_terminator(config.fallthrough)
}

/// Return `true` if the token at `index` is the closing-block delimiter.
///
/// An index past the end of the stream has no current token and yields `false`.
pub fn is_at_closing_delimiter<S, T>(source: &S, index: usize, config: &TerminatorConfig<T::Kind, T::Channel>) -> bool
where
    S: TokenSource<Token = T> + ?Sized,
    T: TokenView,
{
    source
        .get(index)
        .is_some_and(|token| token.kind() == config.closing_delimiter)
}

/// Both predicates bound to one token source and one configuration.
pub struct Predicates<'a, S: ?Sized, K, C> {
    source: &'a S,
    config: TerminatorConfig<K, C>,
}

impl<'a, S, T> Predicates<'a, S, T::Kind, T::Channel>
where
    S: TokenSource<Token = T> + ?Sized,
    T: TokenView,
{
    /// Bind `config` to `source`.
    pub fn new(source: &'a S, config: TerminatorConfig<T::Kind, T::Channel>) -> Self {
        Self { source, config }
    }

    /// The bound configuration.
    pub fn config(&self) -> &TerminatorConfig<T::Kind, T::Channel> {
        &self.config
    }

    /// See [`scan_preceding`].
    pub fn scan_preceding(&self, index: usize) -> Lookback {
        scan_preceding(self.source, index, &self.config)
    }

    /// See [`has_preceding_terminator`].
    pub fn has_preceding_terminator(&self, index: usize) -> bool {
        has_preceding_terminator(self.source, index, &self.config)
    }

    /// See [`is_at_closing_delimiter`].
    pub fn is_at_closing_delimiter(&self, index: usize) -> bool {
        is_at_closing_delimiter(self.source, index, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::TokenStream;

    fn stream(parts: &[(TokenKind, &str)]) -> TokenStream {
        parts.iter().copied().collect()
    }

    fn strict() -> TerminatorConfig<TokenKind, Channel> {
        TerminatorConfig::abla().with_fallthrough(Fallthrough::Reject)
    }

    #[test]
    fn test_newline_before_closing_brace() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::NL, "\n"),
            (TokenKind::RCurl, "}"),
        ]);
        let config = TerminatorConfig::abla();
        assert!(has_preceding_terminator(&s, 2, &config));
        assert!(is_at_closing_delimiter(&s, 2, &config));
        assert_eq!(scan_preceding(&s, 2, &config), Lookback::LineBreak { index: 1 });
    }

    #[test]
    fn test_same_line_fallthrough_is_true_by_default() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "y"),
        ]);
        let config = TerminatorConfig::abla();
        assert_eq!(scan_preceding(&s, 2, &config), Lookback::VisibleToken { index: 0 });
        assert!(has_preceding_terminator(&s, 2, &config));
        assert!(!is_at_closing_delimiter(&s, 2, &config));
    }

    #[test]
    fn test_same_line_rejected_in_strict_mode() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "y"),
        ]);
        assert!(!has_preceding_terminator(&s, 2, &strict()));
    }

    #[test]
    fn test_multiline_comment_counts_as_terminator() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::DelimitedComment, "/* a\nb */"),
            (TokenKind::Identifier, "y"),
        ]);
        assert_eq!(
            scan_preceding(&s, 2, &strict()),
            Lookback::MultiLineComment { index: 1 }
        );
        assert!(has_preceding_terminator(&s, 2, &strict()));
    }

    #[test]
    fn test_carriage_return_in_comment_counts() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::DelimitedComment, "/* a\rb */"),
            (TokenKind::Identifier, "y"),
        ]);
        assert!(has_preceding_terminator(&s, 2, &strict()));
    }

    #[test]
    fn test_single_line_comment_is_skipped() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::DelimitedComment, "/* a */"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "y"),
        ]);
        assert_eq!(scan_preceding(&s, 3, &strict()), Lookback::VisibleToken { index: 0 });
        assert!(!has_preceding_terminator(&s, 3, &strict()));
    }

    #[test]
    fn test_newline_found_behind_other_hidden_tokens() {
        let s = stream(&[
            (TokenKind::Identifier, "x"),
            (TokenKind::LineComment, "// trailing"),
            (TokenKind::NL, "\n"),
            (TokenKind::Whitespace, "    "),
            (TokenKind::DelimitedComment, "/* inline */"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "y"),
        ]);
        assert_eq!(scan_preceding(&s, 6, &strict()), Lookback::LineBreak { index: 2 });
    }

    #[test]
    fn test_walk_stops_at_first_visible_token() {
        // The NL before `a` must not be seen from `c`: `b` stops the walk.
        let s = stream(&[
            (TokenKind::NL, "\n"),
            (TokenKind::Identifier, "a"),
            (TokenKind::Identifier, "b"),
            (TokenKind::Identifier, "c"),
        ]);
        assert_eq!(scan_preceding(&s, 3, &strict()), Lookback::VisibleToken { index: 2 });
    }

    #[test]
    fn test_start_of_stream_is_terminator_in_both_modes() {
        let s = stream(&[(TokenKind::Identifier, "x")]);
        assert_eq!(scan_preceding(&s, 0, &strict()), Lookback::StartOfStream);
        assert!(has_preceding_terminator(&s, 0, &strict()));
        assert!(has_preceding_terminator(&s, 0, &TerminatorConfig::abla()));

        let hidden_prefix = stream(&[(TokenKind::Whitespace, "  "), (TokenKind::Identifier, "x")]);
        assert_eq!(scan_preceding(&hidden_prefix, 1, &strict()), Lookback::StartOfStream);
    }

    #[test]
    fn test_empty_stream_and_out_of_range_index() {
        let empty = TokenStream::new();
        assert!(has_preceding_terminator(&empty, 0, &strict()));
        assert!(!is_at_closing_delimiter(&empty, 0, &strict()));

        let s = stream(&[(TokenKind::Identifier, "x"), (TokenKind::NL, "\n")]);
        // Past the end: the walk starts at the last token.
        assert_eq!(scan_preceding(&s, 10, &strict()), Lookback::LineBreak { index: 1 });
        assert!(!is_at_closing_delimiter(&s, 10, &strict()));
    }

    #[test]
    fn test_eof_is_not_a_closing_delimiter() {
        let s = stream(&[(TokenKind::RCurl, "}"), (TokenKind::Eof, "")]);
        let config = TerminatorConfig::abla();
        assert!(is_at_closing_delimiter(&s, 0, &config));
        assert!(!is_at_closing_delimiter(&s, 1, &config));
    }

    #[test]
    fn test_visible_line_break_token_still_terminates() {
        let mut s = TokenStream::new();
        s.push(TokenKind::Identifier, "x");
        s.push_on(TokenKind::NL, Channel::Default, "\n");
        s.push(TokenKind::Identifier, "y");
        assert_eq!(scan_preceding(&s, 2, &strict()), Lookback::LineBreak { index: 1 });
    }

    #[test]
    fn test_bound_predicates_match_free_functions() {
        let s = stream(&[
            (TokenKind::LCurl, "{"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RCurl, "}"),
        ]);
        let preds = Predicates::new(&s, strict());
        for index in 0..=s.len() {
            assert_eq!(preds.has_preceding_terminator(index), has_preceding_terminator(&s, index, &strict()));
            assert_eq!(preds.is_at_closing_delimiter(index), is_at_closing_delimiter(&s, index, &strict()));
        }
        assert_eq!(preds.config().fallthrough, Fallthrough::Reject);
    }

    #[test]
    fn test_custom_token_type_via_slice() {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Tag {
            Word,
            Break,
            Note,
            Close,
        }

        struct Tok(Tag, bool, &'static str);

        impl TokenView for Tok {
            type Kind = Tag;
            type Channel = bool;
            fn kind(&self) -> Tag {
                self.0
            }
            fn channel(&self) -> bool {
                self.1
            }
            fn text(&self) -> &str {
                self.2
            }
        }

        let tokens = [
            Tok(Tag::Word, false, "a"),
            Tok(Tag::Note, true, "(* \n *)"),
            Tok(Tag::Close, false, "end"),
        ];
        let config = TerminatorConfig::new(Tag::Break, Tag::Note, Tag::Close, true)
            .with_fallthrough(Fallthrough::Reject);

        assert!(has_preceding_terminator(&tokens[..], 2, &config));
        assert!(is_at_closing_delimiter(&tokens[..], 2, &config));
        assert!(!has_preceding_terminator(&tokens[..], 1, &config));
        assert!(!is_at_closing_delimiter(&tokens[..], 0, &config));
    }
}

/// Parser core types and entrypoint.
///
/// This chunk defines [`ParserConfig`], the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Token tags and fallthrough mode used by the statement-terminator predicates.
    pub terminators: TerminatorConfig<TokenKind, Channel>,
}

impl ParserConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Config that requires a real line break (or `;`) between statements on the same line.
    pub fn strict() -> Self {
        Self::new().with_fallthrough(Fallthrough::Reject)
    }

    /// Set what the terminator predicate answers when no line break precedes a token.
    pub fn with_fallthrough(mut self, fallthrough: Fallthrough) -> Self {
        self.terminators = self.terminators.with_fallthrough(fallthrough);
        self
    }
}

/// Deepest nesting of expressions, blocks, types and declarations the parser descends into.
///
/// Input nested deeper than this is rejected with a [`SyntaxError`] instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// Stand-in for a missing trailing `Eof` in hand-built streams.
static EOF: Token = Token {
    kind: TokenKind::Eof,
    channel: Channel::Default,
    text: String::new(),
    span: Span { start: 0, end: 0 },
    index: 0,
    start: Point { line: 1, column: 1 },
};

/// Parser state.
///
/// ## Notes
/// - `pos` is a stream index and always rests on a default-channel token (or one past the end).
/// - The parser recovers from errors by synchronizing at statement boundaries and reports all of
///   them at the end.
pub struct Parser<'a> {
    stream: &'a TokenStream,
    pos: usize,
    previous: Span,
    depth: usize,
    config: ParserConfig,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `stream`: Token stream produced by `abla_syntax::lexer`, hidden tokens included.
    /// - `config`: Terminator predicate configuration.
    pub fn new(stream: &'a TokenStream, config: ParserConfig) -> Self {
        let pos = stream.next_visible(0).unwrap_or(stream.len());
        Self {
            stream,
            pos,
            previous: Span::default(),
            depth: 0,
            config,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`File`].
    ///
    /// ## Errors
    /// Returns every [`SyntaxError`] found; the parser continues after an error to report
    /// multiple issues in one pass.
    pub fn parse(mut self) -> Result<File, Vec<SyntaxError>> {
        let declarations = self.separated(false, Self::declaration);

        if self.errors.is_empty() {
            Ok(File { declarations })
        } else {
            Err(self.errors)
        }
    }
}

// Cursor movement, token matching, statement separation and error recovery.

impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self) -> &'a Token {
        self.stream.get(self.pos).unwrap_or(&EOF)
    }

    /// The `n`-th default-channel token after the current one.
    fn peek_nth(&self, n: usize) -> &'a Token {
        let mut pos = self.pos;
        for _ in 0..n {
            match self.stream.next_visible(pos + 1) {
                Some(next) => pos = next,
                None => return &EOF,
            }
        }
        self.stream.get(pos).unwrap_or(&EOF)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consume the current token and move to the next default-channel token.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.previous = token.span;
            self.pos = self.stream.next_visible(self.pos + 1).unwrap_or(self.stream.len());
        }
        token
    }

    fn current_span(&self) -> Span {
        match self.stream.get(self.pos) {
            Some(token) => token.span,
            None => {
                let end = self.stream.end_offset();
                Span::new(end, end)
            }
        }
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<&'a Token, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", keywords::as_str(id))))
        }
    }

    fn identifier(&mut self) -> Result<Ident, SyntaxError> {
        Ok(self.expect(TokenKind::Identifier, "identifier")?.text.clone())
    }

    fn unexpected(&self, what: &str) -> SyntaxError {
        SyntaxError::syntax(
            format!("Expected {}, found {}", what, self.peek().kind),
            self.current_span(),
        )
    }

    /// Run `parse` one nesting level deeper, failing once [`MAX_NESTING`] levels are open.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::syntax(
                format!("Nesting exceeds {} levels", MAX_NESTING),
                self.current_span(),
            )
            .with_hint("split deeply nested code into smaller functions"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Whether an implicit statement terminator precedes the current token.
    fn line_terminator(&self) -> bool {
        predicates::has_preceding_terminator(self.stream, self.pos, &self.config.terminators)
    }

    /// Whether the current token closes a block; such a token ends a statement without being
    /// consumed by it.
    fn no_consume_closing(&self) -> bool {
        predicates::is_at_closing_delimiter(self.stream, self.pos, &self.config.terminators)
    }

    /// Whether an actual line break separates the current token from the previous visible one.
    ///
    /// Used where layout changes meaning regardless of the fallthrough mode: call, index and
    /// trailing-lambda suffixes must start on the line of the expression they apply to.
    fn on_new_line(&self) -> bool {
        predicates::scan_preceding(self.stream, self.pos, &self.config.terminators).found_line_break()
    }

    fn skip_semicolons(&mut self) {
        while self.match_token(TokenKind::Semicolon) {}
    }

    /// Consume what separates one statement from the next.
    fn statement_separator(&mut self) -> Result<(), SyntaxError> {
        if self.check(TokenKind::Semicolon) {
            self.skip_semicolons();
            return Ok(());
        }
        if self.is_at_end() || self.no_consume_closing() || self.line_terminator() {
            return Ok(());
        }
        Err(SyntaxError::syntax(
            format!("Expected newline or ';' before {}", self.peek().kind),
            self.current_span(),
        )
        .with_hint("separate statements on the same line with ';'"))
    }

    /// Parse a sequence of statement-like items separated by `;` or line breaks.
    ///
    /// With `in_block`, the sequence ends at `}` (left for the caller); otherwise it runs to the end
    /// of the stream.
    fn separated<T>(&mut self, in_block: bool, mut item: impl FnMut(&mut Self) -> Result<T, SyntaxError>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            self.skip_semicolons();
            if self.is_at_end() || (in_block && self.no_consume_closing()) {
                break;
            }
            let start = self.pos;
            match item(self) {
                Ok(node) => {
                    items.push(node);
                    // A missing separator is reported, then parsing resumes at the same token.
                    if let Err(err) = self.statement_separator() {
                        self.errors.push(err);
                    }
                }
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize(in_block, start);
                }
            }
        }
        items
    }

    /// Skip tokens until the start of the next statement.
    ///
    /// Stops after `;`, before `}` when `in_block`, at the end of the stream, or before the first
    /// token that follows an actual line break. The failed item started at stream index `start`; if it
    /// consumed nothing, at least one token is skipped so the caller always makes progress.
    fn synchronize(&mut self, in_block: bool, start: usize) {
        tracing::debug!(index = self.pos, "recovering from syntax error");
        let mut consumed = self.pos != start;
        loop {
            if self.is_at_end() || (in_block && self.no_consume_closing()) {
                return;
            }
            if self.match_token(TokenKind::Semicolon) {
                return;
            }
            if consumed && self.on_new_line() {
                return;
            }
            self.advance();
            consumed = true;
        }
    }
}

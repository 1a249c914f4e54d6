// Blocks and statements.

impl<'a> Parser<'a> {
    /// `{ statements }`
    fn block(&mut self) -> Result<Spanned<Block>, SyntaxError> {
        self.nested(|p| {
            let start = p.current_span();
            p.expect(TokenKind::LCurl, "'{'")?;
            let statements = p.separated(true, Self::statement);
            p.expect(TokenKind::RCurl, "'}'")?;
            Ok(Spanned::new(Block { statements }, p.span_from(start)))
        })
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, SyntaxError> {
        let start = self.current_span();
        let statement = match self.peek().kind {
            TokenKind::Keyword(KeywordId::While) => Statement::While(self.while_statement()?),
            TokenKind::At
            | TokenKind::Keyword(
                KeywordId::Fun | KeywordId::Val | KeywordId::Var | KeywordId::Extern | KeywordId::Compiler | KeywordId::Abstract,
            ) => {
                let modifiers = self.modifiers()?;
                match self.peek().kind {
                    TokenKind::Keyword(KeywordId::Fun) => Statement::Function(self.function_decl(modifiers)?),
                    TokenKind::Keyword(KeywordId::Val | KeywordId::Var) => {
                        Statement::Property(self.property_decl(modifiers)?)
                    }
                    _ => return Err(self.unexpected("'fun', 'val' or 'var'")),
                }
            }
            _ => Statement::Expr(self.expression()?.node),
        };
        Ok(Spanned::new(statement, self.span_from(start)))
    }

    /// `while (condition) body`
    fn while_statement(&mut self) -> Result<WhileStmt, SyntaxError> {
        self.expect_keyword(KeywordId::While)?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.control_structure_body()?;
        Ok(WhileStmt { condition, body })
    }

    /// A block, or a single statement treated as a one-statement block.
    fn control_structure_body(&mut self) -> Result<Spanned<Block>, SyntaxError> {
        if self.check(TokenKind::LCurl) {
            return self.block();
        }
        let statement = self.statement()?;
        let span = statement.span;
        Ok(Spanned::new(
            Block {
                statements: vec![statement],
            },
            span,
        ))
    }
}

// Declarations: modifiers, functions, classes, properties and compiler calls.

impl<'a> Parser<'a> {
    fn declaration(&mut self) -> Result<Spanned<Declaration>, SyntaxError> {
        self.nested(Self::declaration_inner)
    }

    fn declaration_inner(&mut self) -> Result<Spanned<Declaration>, SyntaxError> {
        let start = self.current_span();
        if self.check(TokenKind::Hash) {
            let call = self.compiler_call()?;
            return Ok(Spanned::new(Declaration::CompilerCall(call), self.span_from(start)));
        }

        let modifiers = self.modifiers()?;
        let decl = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Fun) => Declaration::Function(self.function_decl(modifiers)?),
            TokenKind::Keyword(KeywordId::Class) => Declaration::Class(self.class_decl(modifiers)?),
            TokenKind::Keyword(KeywordId::Val | KeywordId::Var) => {
                Declaration::Property(self.property_decl(modifiers)?)
            }
            _ => return Err(self.unexpected("declaration")),
        };
        Ok(Spanned::new(decl, self.span_from(start)))
    }

    /// `#callee(args)...` at declaration level.
    fn compiler_call(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let hash = self.expect(TokenKind::Hash, "'#'")?;
        let call = self.postfix()?;
        if !matches!(call.node, Expr::Call { .. }) {
            return Err(SyntaxError::syntax("Expected a call after '#'", hash.span.merge(call.span))
                .with_hint("compiler calls look like `#name(args)`"));
        }
        Ok(call)
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    fn modifiers(&mut self) -> Result<Modifiers, SyntaxError> {
        let mut modifiers = Modifiers::default();
        loop {
            let start = self.current_span();
            match self.peek().kind {
                TokenKind::At => {
                    let annotation = self.annotation()?;
                    modifiers
                        .annotations
                        .push(Spanned::new(annotation, self.span_from(start)));
                }
                TokenKind::Keyword(KeywordId::Extern) => {
                    self.advance();
                    let library = if self.match_token(TokenKind::LParen) {
                        let literal = self.expect(TokenKind::StringLiteral, "library name string")?;
                        self.expect(TokenKind::RParen, "')'")?;
                        Some(string_text(&decode_string_literal(&literal.text)))
                    } else {
                        None
                    };
                    modifiers
                        .modifiers
                        .push(Spanned::new(Modifier::Extern(library), self.span_from(start)));
                }
                TokenKind::Keyword(KeywordId::Compiler) => {
                    self.advance();
                    modifiers
                        .modifiers
                        .push(Spanned::new(Modifier::Compiler, self.span_from(start)));
                }
                TokenKind::Keyword(KeywordId::Abstract) => {
                    self.advance();
                    modifiers
                        .modifiers
                        .push(Spanned::new(Modifier::Abstract, self.span_from(start)));
                }
                _ => return Ok(modifiers),
            }
        }
    }

    /// `@name` or `@name(args)`
    fn annotation(&mut self) -> Result<Annotation, SyntaxError> {
        self.expect(TokenKind::At, "'@'")?;
        let name = self.identifier()?;
        let args = if self.check(TokenKind::LParen) && !self.on_new_line() {
            self.arguments()?
        } else {
            Vec::new()
        };
        Ok(Annotation { name, args })
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn function_decl(&mut self, modifiers: Modifiers) -> Result<FunctionDecl, SyntaxError> {
        self.expect_keyword(KeywordId::Fun)?;

        let (receiver, name) = if self.check(TokenKind::Identifier) && self.peek_nth(1).kind == TokenKind::LParen {
            (None, self.identifier()?)
        } else {
            let ty = self.parse_type()?;
            if self.match_token(TokenKind::Dot) {
                (Some(ty), self.identifier()?)
            } else {
                split_receiver(ty)?
            }
        };

        let params = self.params()?;
        let return_type = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = if self.check(TokenKind::LCurl) {
            Some(self.block()?)
        } else if self.check(TokenKind::Assign) {
            // `= expr` is a block holding one expression statement.
            self.advance();
            let value = self.expression()?;
            let span = value.span;
            let statement = Spanned::new(Statement::Expr(value.node), span);
            Some(Spanned::new(
                Block {
                    statements: vec![statement],
                },
                span,
            ))
        } else {
            None
        };

        Ok(FunctionDecl {
            modifiers,
            receiver,
            name,
            params,
            return_type,
            body,
        })
    }

    fn params(&mut self) -> Result<Vec<Spanned<Param>>, SyntaxError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) {
            let start = self.current_span();
            let name = self.identifier()?;
            self.expect(TokenKind::Colon, "':'")?;
            let ty = self.parse_type()?;
            params.push(Spanned::new(Param { name, ty }, self.span_from(start)));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn class_decl(&mut self, modifiers: Modifiers) -> Result<ClassDecl, SyntaxError> {
        self.expect_keyword(KeywordId::Class)?;
        let name = self.identifier()?;

        let constructor = if self.check(TokenKind::LParen) {
            let start = self.current_span();
            let params = self.constructor_params()?;
            Some(Spanned::new(ClassConstructor { params }, self.span_from(start)))
        } else {
            None
        };

        let members = if self.match_token(TokenKind::LCurl) {
            let members = self.separated(true, Self::declaration);
            self.expect(TokenKind::RCurl, "'}'")?;
            members
        } else {
            Vec::new()
        };

        Ok(ClassDecl {
            modifiers,
            name,
            constructor,
            members,
        })
    }

    fn constructor_params(&mut self) -> Result<Vec<Spanned<ConstructorParam>>, SyntaxError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) {
            let start = self.current_span();
            let modifiers = self.modifiers()?;
            let param = match self.peek().kind {
                TokenKind::Keyword(KeywordId::Val | KeywordId::Var) => {
                    ConstructorParam::Property(self.property_decl(modifiers)?)
                }
                _ => {
                    if !modifiers.is_empty() {
                        return Err(self.unexpected("'val' or 'var' after modifiers"));
                    }
                    let name = self.identifier()?;
                    self.expect(TokenKind::Colon, "':'")?;
                    let ty = self.parse_type()?;
                    ConstructorParam::Param(Param { name, ty })
                }
            };
            params.push(Spanned::new(param, self.span_from(start)));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn property_decl(&mut self, modifiers: Modifiers) -> Result<PropertyDecl, SyntaxError> {
        let readonly = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Val) => true,
            TokenKind::Keyword(KeywordId::Var) => false,
            _ => return Err(self.unexpected("'val' or 'var'")),
        };
        self.advance();

        let name = self.identifier()?;
        let ty = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.match_token(TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };

        Ok(PropertyDecl {
            modifiers,
            readonly,
            name,
            ty,
            value,
        })
    }
}

/// Split `Outer.name` parsed as a user type into receiver `Outer` and function name `name`.
fn split_receiver(ty: Spanned<Type>) -> Result<(Option<Spanned<Type>>, Ident), SyntaxError> {
    match ty.node {
        Type::User(UserType {
            parent: Some(parent),
            name,
            args,
        }) if args.is_empty() => {
            let receiver_span = Span::new(ty.span.start, ty.span.end.saturating_sub(name.len() + 1));
            Ok((Some(Spanned::new(Type::User(*parent), receiver_span)), name))
        }
        _ => Err(SyntaxError::syntax("Expected function name", ty.span)),
    }
}

/// Concatenate the text parts of a decoded string literal, keeping `$name` references verbatim.
fn string_text(parts: &[StringPart]) -> String {
    parts
        .iter()
        .map(|part| match part {
            StringPart::Text(text) => text.clone(),
            StringPart::Ref(name) => format!("${}", name),
        })
        .collect()
}

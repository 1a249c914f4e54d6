// Expressions, lowest precedence first:
//
//   assignment      target = value (right-associative)
//   equality        == !=
//   comparison      < > <= >=
//   additive        + -
//   multiplicative  * /
//   prefix          #expr
//   postfix         call, trailing lambda, member, index
//   primary

impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let target = self.equality()?;
        if !self.check(TokenKind::Assign) {
            return Ok(target);
        }
        if !is_assignable(&target.node) {
            return Err(SyntaxError::syntax("Invalid assignment target", target.span)
                .with_hint("only names, members and index expressions can be assigned"));
        }
        self.advance();
        let value = self.expression()?;
        Ok(Spanned::new(
            Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            self.span_from(start),
        ))
    }

    fn equality(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::comparison, |kind| match kind {
            TokenKind::Equals => Some(BinaryOp::Equals),
            TokenKind::NotEquals => Some(BinaryOp::NotEquals),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::additive, |kind| match kind {
            TokenKind::LAngle => Some(BinaryOp::LessThan),
            TokenKind::RAngle => Some(BinaryOp::GreaterThan),
            TokenKind::Lte => Some(BinaryOp::LessThanEqual),
            TokenKind::Gte => Some(BinaryOp::GreaterThanEqual),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Plus),
            TokenKind::Minus => Some(BinaryOp::Minus),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::prefix, |kind| match kind {
            TokenKind::Mul => Some(BinaryOp::Mul),
            TokenKind::Div => Some(BinaryOp::Div),
            _ => None,
        })
    }

    /// Left-associative chain of `operand (op operand)*`.
    fn binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Spanned<Expr>, SyntaxError>,
        operator: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let mut lhs = operand(self)?;
        while let Some(op) = operator(self.peek().kind) {
            self.advance();
            let rhs = operand(self)?;
            lhs = Spanned::new(
                Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                self.span_from(start),
            );
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        if self.match_token(TokenKind::Hash) {
            let inner = self.nested(Self::prefix)?;
            return Ok(Spanned::new(Expr::CompilerExec(Box::new(inner)), self.span_from(start)));
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let mut expr = self.primary()?;
        loop {
            let node = match self.peek().kind {
                TokenKind::LParen if !self.on_new_line() => {
                    let mut args = self.arguments()?;
                    if self.check(TokenKind::LCurl) && !self.on_new_line() {
                        args.push(self.trailing_lambda()?);
                    }
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                TokenKind::LCurl if !self.on_new_line() => Expr::Call {
                    callee: Box::new(expr),
                    args: vec![self.trailing_lambda()?],
                },
                TokenKind::LSquare if !self.on_new_line() => {
                    self.advance();
                    let index = self.expression()?;
                    self.expect(TokenKind::RSquare, "']'")?;
                    Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.identifier()?;
                    Expr::Member {
                        target: Box::new(expr),
                        name,
                    }
                }
                _ => return Ok(expr),
            };
            expr = Spanned::new(node, self.span_from(start));
        }
    }

    /// `( (name =)? expr, ... )`
    fn arguments(&mut self) -> Result<Vec<Spanned<Argument>>, SyntaxError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            let start = self.current_span();
            let name = if self.check(TokenKind::Identifier) && self.peek_nth(1).kind == TokenKind::Assign {
                let name = self.identifier()?;
                self.advance();
                Some(name)
            } else {
                None
            };
            let value = self.expression()?;
            args.push(Spanned::new(Argument { name, value }, self.span_from(start)));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(args)
    }

    fn trailing_lambda(&mut self) -> Result<Spanned<Argument>, SyntaxError> {
        let block = self.block()?;
        let span = block.span;
        Ok(Spanned::new(
            Argument {
                name: None,
                value: Spanned::new(Expr::FunctionLiteral(block.node), span),
            },
            span,
        ))
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let token = self.peek();
        let expr = match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Expr::Ident(token.text.clone())
            }
            TokenKind::IntegerLiteral => {
                self.advance();
                Expr::Integer(token.text.clone())
            }
            TokenKind::StringLiteral => {
                self.advance();
                Expr::String(decode_string_literal(&token.text))
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.advance();
                Expr::Null
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                // Parentheses only group; the span widens to include them.
                inner.node
            }
            TokenKind::LSquare => self.array_literal()?,
            TokenKind::LCurl => Expr::FunctionLiteral(self.block()?.node),
            TokenKind::Keyword(KeywordId::If) => self.if_expression()?,
            TokenKind::Keyword(KeywordId::When) => self.when_expression()?,
            _ => return Err(self.unexpected("expression")),
        };
        Ok(Spanned::new(expr, self.span_from(start)))
    }

    /// `[a, b, ...]`
    fn array_literal(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(TokenKind::LSquare, "'['")?;
        let mut elements = Vec::new();
        while !self.check(TokenKind::RSquare) {
            elements.push(self.expression()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RSquare, "']'")?;
        Ok(Expr::Array(elements))
    }

    /// `if (condition) body (else body)?`
    fn if_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.expect_keyword(KeywordId::If)?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_body = self.control_structure_body()?;
        self.skip_semicolons_before_else();
        let else_body = if self.match_keyword(KeywordId::Else) {
            Some(self.control_structure_body()?)
        } else {
            None
        };
        Ok(Expr::If {
            condition: Box::new(condition),
            then_body,
            else_body,
        })
    }

    /// `if (a) b; else c` keeps the `else` attached.
    fn skip_semicolons_before_else(&mut self) {
        if self.check(TokenKind::Semicolon) && self.peek_nth(1).kind.is_keyword(KeywordId::Else) {
            self.advance();
        }
    }

    /// `when (subject)? { cases }`
    fn when_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.expect_keyword(KeywordId::When)?;
        let subject = if self.match_token(TokenKind::LParen) {
            let subject = self.expression()?;
            self.expect(TokenKind::RParen, "')'")?;
            Some(Box::new(subject))
        } else {
            None
        };
        self.expect(TokenKind::LCurl, "'{'")?;
        let cases = self.separated(true, Self::when_case);
        self.expect(TokenKind::RCurl, "'}'")?;
        Ok(Expr::When { subject, cases })
    }

    /// `a, b -> body` or `else -> body`
    fn when_case(&mut self) -> Result<Spanned<WhenCase>, SyntaxError> {
        let start = self.current_span();
        let case = if self.match_keyword(KeywordId::Else) {
            self.expect(TokenKind::Arrow, "'->'")?;
            WhenCase::Else(self.control_structure_body()?)
        } else {
            let mut conditions = vec![self.expression()?];
            while self.match_token(TokenKind::Comma) {
                conditions.push(self.expression()?);
            }
            self.expect(TokenKind::Arrow, "'->'")?;
            WhenCase::Match {
                conditions,
                body: self.control_structure_body()?,
            }
        };
        Ok(Spanned::new(case, self.span_from(start)))
    }
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(_) | Expr::Member { .. } | Expr::Index { .. })
}

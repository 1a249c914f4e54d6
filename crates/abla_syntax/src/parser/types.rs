// Type expressions.

impl<'a> Parser<'a> {
    /// Parse a type: a user type, a parenthesized type or a function type, optionally followed by
    /// `?` and any number of `*`.
    fn parse_type(&mut self) -> Result<Spanned<Type>, SyntaxError> {
        self.nested(Self::nullable_or_pointer_type)
    }

    fn nullable_or_pointer_type(&mut self) -> Result<Spanned<Type>, SyntaxError> {
        let start = self.current_span();
        let mut ty = match self.peek().kind {
            TokenKind::LParen => self.parenthesized_or_function_type(None)?,
            TokenKind::Identifier => {
                let user = self.user_type()?;
                let user = Spanned::new(Type::User(user), self.span_from(start));
                if self.check(TokenKind::Dot) && self.peek_nth(1).kind == TokenKind::LParen {
                    // `Recv.(A) -> R`
                    self.advance();
                    self.parenthesized_or_function_type(Some(user))?
                } else {
                    user
                }
            }
            _ => return Err(self.unexpected("type")),
        };

        if self.match_token(TokenKind::Question) {
            ty = Spanned::new(Type::Nullable(Box::new(ty)), self.span_from(start));
        }
        while self.match_token(TokenKind::Mul) {
            ty = Spanned::new(Type::Pointer(Box::new(ty)), self.span_from(start));
        }
        Ok(ty)
    }

    /// `Name<Args>` segments separated by `.`, each nesting the previous one as its parent.
    fn user_type(&mut self) -> Result<UserType, SyntaxError> {
        let mut user = self.simple_user_type(None)?;
        while self.check(TokenKind::Dot) && self.peek_nth(1).kind == TokenKind::Identifier {
            self.advance();
            user = self.simple_user_type(Some(Box::new(user)))?;
        }
        Ok(user)
    }

    fn simple_user_type(&mut self, parent: Option<Box<UserType>>) -> Result<UserType, SyntaxError> {
        let name = self.identifier()?;
        let mut args = Vec::new();
        if self.match_token(TokenKind::LAngle) {
            loop {
                args.push(self.parse_type()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RAngle, "'>'")?;
        }
        Ok(UserType { parent, name, args })
    }

    /// `( ... )` followed by `-> R` is a function type; a single unnamed type without an arrow is a
    /// parenthesized type.
    fn parenthesized_or_function_type(&mut self, receiver: Option<Spanned<Type>>) -> Result<Spanned<Type>, SyntaxError> {
        let start = receiver.as_ref().map_or_else(|| self.current_span(), |r| r.span);
        self.expect(TokenKind::LParen, "'('")?;

        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) {
            let name = if self.check(TokenKind::Identifier) && self.peek_nth(1).kind == TokenKind::Colon {
                let name = self.identifier()?;
                self.advance();
                Some(name)
            } else {
                None
            };
            params.push((name, self.parse_type()?));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        if self.match_token(TokenKind::Arrow) {
            let ret = self.parse_type()?;
            let function = FunctionType {
                receiver: receiver.map(Box::new),
                params,
                ret: Box::new(ret),
            };
            return Ok(Spanned::new(Type::Function(function), self.span_from(start)));
        }

        match (receiver, params.pop()) {
            (None, Some((None, inner))) if params.is_empty() => Ok(inner),
            _ => Err(SyntaxError::syntax("Expected '->' after function type parameters", self.current_span())),
        }
    }
}

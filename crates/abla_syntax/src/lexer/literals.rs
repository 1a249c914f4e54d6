//! Literal scanning for the Abla lexer.
//!
//! Handles string literals (escapes and `$name` references) and integer literals (decimal, `0x`
//! hexadecimal, `0b` binary, `_` separators). Literal tokens keep their raw text; decoding a string
//! literal into parts happens in [`decode_string_literal`], which the parser calls.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::StringPart;

impl<'a> Lexer<'a> {
    /// Scan the rest of a `"..."` literal. Raw line breaks are not allowed inside strings.
    pub(super) fn scan_string(&mut self, start: usize) {
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    self.error("Unterminated string literal", start);
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_pos;
                    self.advance();
                    self.scan_escape(escape_start);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        self.add_token(TokenKind::StringLiteral, start);
    }

    fn scan_escape(&mut self, escape_start: usize) {
        match self.peek() {
            Some('t' | 'b' | 'r' | 'n' | '"' | '\\' | '$') => {
                self.advance();
            }
            Some('u') => {
                self.advance();
                for _ in 0..4 {
                    match self.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            self.advance();
                        }
                        _ => {
                            self.error("Invalid unicode escape: expected 4 hex digits", escape_start);
                            return;
                        }
                    }
                }
            }
            Some('\n') | Some('\r') | None => {
                // Reported as an unterminated string by the caller.
            }
            Some(c) => {
                self.advance();
                self.error(format!("Invalid escape sequence '\\{}'", c), escape_start);
            }
        }
    }

    /// Scan an integer literal whose first digit has been consumed.
    pub(super) fn scan_integer(&mut self, start: usize, first: char) {
        if first == '0' && matches!(self.peek(), Some('x' | 'X' | 'b' | 'B')) {
            let radix = match self.advance() {
                Some('x' | 'X') => 16,
                _ => 2,
            };
            let digits_start = self.current_pos;
            self.advance_while(|c| c.is_digit(radix) || c == '_');
            if !self.source[digits_start..self.current_pos]
                .chars()
                .any(|c| c.is_digit(radix))
            {
                self.error("Missing digits after integer prefix", start);
            }
        } else {
            self.advance_while(|c| c.is_ascii_digit() || c == '_');
        }
        self.add_token(TokenKind::IntegerLiteral, start);
    }
}

/// Decode the raw text of a string literal token into literal text and `$name` references.
///
/// ## Notes
/// - The surrounding quotes are stripped if present.
/// - Escapes the lexer rejected are kept verbatim; a lone `$` is literal text.
pub fn decode_string_literal(raw: &str) -> Vec<StringPart> {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('t') => text.push('\t'),
                Some('b') => text.push('\u{0008}'),
                Some('r') => text.push('\r'),
                Some('n') => text.push('\n'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => text.push(decoded),
                        None => {
                            text.push_str("\\u");
                            text.push_str(&hex);
                        }
                    }
                }
                Some(other) => text.push(other),
                None => text.push('\\'),
            },
            '$' if chars.peek().is_some_and(|c| c.is_ascii_alphabetic() || *c == '_') => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if !text.is_empty() {
                    parts.push(StringPart::Text(std::mem::take(&mut text)));
                }
                parts.push(StringPart::Ref(name));
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        parts.push(StringPart::Text(text));
    }
    parts
}

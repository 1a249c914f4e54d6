//! Syntax diagnostics for the Abla frontend.
//!
//! Lexer and parser errors share one type, [`SyntaxError`], which implements both
//! [`std::error::Error`] (via `thiserror`) and [`miette::Diagnostic`] so the CLI can render it with a
//! labelled source excerpt.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

/// Phase that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A lexical or syntax error with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(abla::syntax))]
pub struct SyntaxError {
    pub message: String,
    #[label("here")]
    pub span: Span,
    pub kind: ErrorKind,
    #[help]
    pub hint: Option<String>,
}

impl SyntaxError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Lexical,
            hint: None,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Syntax,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = SyntaxError::syntax("Expected expression, found '}'", Span::new(3, 4));
        assert_eq!(err.to_string(), "syntax error: Expected expression, found '}'");

        let err = SyntaxError::lexical("Unterminated string literal", Span::new(0, 1));
        assert_eq!(err.to_string(), "lexical error: Unterminated string literal");
    }

    #[test]
    fn test_diagnostic_label_and_help() {
        let err = SyntaxError::syntax("bad", Span::new(2, 5)).with_hint("try this");
        let labels: Vec<_> = err.labels().map(|l| l.collect::<Vec<_>>()).unwrap_or_default();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].len(), 3);
        assert_eq!(err.help().map(|h| h.to_string()), Some("try this".to_string()));
    }
}

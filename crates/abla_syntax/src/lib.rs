//! Syntax frontend for the Abla language: lexer, token stream, terminator predicates, parser, AST,
//! diagnostics.
//!
//! Abla statements end at a line break, a `;` or a closing `}`. Line breaks travel on the hidden token
//! channel, so the parser never sees them directly; instead it asks [`predicates`] whether an implicit
//! terminator precedes the current token.
//!
//! ## Notes
//! - This crate is “syntax-only”: it does not do name resolution, type checking, or code generation.
//! - [`predicates`] is generic over [`stream::TokenSource`] and works with any lexer whose tokens carry
//!   a kind, a channel and their text.
//!
//! ## Examples
//! ```rust,no_run
//! use abla_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("val x = 1\nval y = 2\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.declarations.len(), 2);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod predicates;
pub mod stream;

//! Parser for the Abla programming language
//!
//! Converts a [`TokenStream`] into an AST [`File`]. The parser only ever looks at default-channel
//! tokens; statement boundaries that the layout implies are decided by the terminator predicates in
//! [`crate::predicates`], which look back over the hidden tokens the parser skips.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use abla_syntax::{lexer, parser};
//!
//! let source = "fun main() {\n    val x = 1\n    print(x)\n}\n";
//! let tokens = lexer::lex(source).unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.declarations.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::SyntaxError;
use crate::keywords::{self, KeywordId};
use crate::lexer::{Channel, Token, TokenKind, decode_string_literal};
use crate::predicates::{self, Fallthrough, TerminatorConfig};
use crate::stream::TokenStream;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");

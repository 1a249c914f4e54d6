#![forbid(unsafe_code)]
//! Abla syntax tooling
//!
//! This crate provides the `abla` command-line tool on top of the [`abla_syntax`] frontend: token
//! dumps, parsing, syntax checking and a report of the statement-terminator predicates for every
//! token of a file.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod render;

pub use abla_syntax::ast;
pub use abla_syntax::diagnostics;
pub use abla_syntax::lexer;
pub use abla_syntax::parser;
pub use abla_syntax::predicates;
pub use abla_syntax::stream;

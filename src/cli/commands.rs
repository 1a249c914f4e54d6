//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use abla_syntax::ast::File;
use abla_syntax::diagnostics::SyntaxError;
use abla_syntax::parser::{self, ParserConfig};
use abla_syntax::stream::TokenStream;
use abla_syntax::lexer;

use super::{CliError, CliResult, ExitCode};
use crate::render;

/// Maximum source file size (10 MiB)
///
/// Files larger than this are rejected before reading.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a source file, rejecting files over [`MAX_SOURCE_SIZE`].
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn syntax_failure(file_path: &str, source: &str, errors: &[SyntaxError]) -> CliError {
    CliError::failure(render::format_errors(file_path, source, errors).trim_end())
}

fn lex_source(file_path: &str, source: &str) -> CliResult<TokenStream> {
    lexer::lex(source).map_err(|errs| syntax_failure(file_path, source, &errs))
}

fn parse_source(file_path: &str, source: &str, config: &ParserConfig) -> CliResult<File> {
    let tokens = lex_source(file_path, source)?;
    parser::parse_with_config(&tokens, config).map_err(|errs| syntax_failure(file_path, source, &errs))
}

/// Tokenize and print the token stream.
pub fn lex_file(file_path: &str, include_hidden: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;
    println!("{}", render::token_dump(&tokens, include_hidden));
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &str, config: &ParserConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let ast = parse_source(file_path, &source, config)?;
    println!("{:#?}", ast);
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and report success or its diagnostics.
pub fn check_file(file_path: &str, config: &ParserConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let ast = parse_source(file_path, &source, config)?;
    tracing::info!(file = file_path, declarations = ast.declarations.len(), "syntax check passed");
    println!("✓ Syntax check passed!");
    Ok(ExitCode::SUCCESS)
}

/// Print the terminator predicates for every visible token.
pub fn terminators_file(file_path: &str, config: &ParserConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;
    println!("{}", render::terminator_report(&tokens, config.terminators));
    Ok(ExitCode::SUCCESS)
}

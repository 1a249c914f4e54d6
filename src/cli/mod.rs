//! CLI module for the Abla syntax tools
//!
//! ## Commands
//!
//! - `lex <file>` - Print the token stream
//! - `parse <file>` - Parse and print the AST
//! - `check <file>` - Parse and report diagnostics only
//! - `terminators <file>` - Print the statement-terminator predicates for every visible token
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use abla_syntax::parser::ParserConfig;
use abla_syntax::predicates::Fallthrough;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Syntax tools for the Abla programming language
#[derive(Parser, Debug)]
#[command(name = "abla")]
#[command(version = VERSION)]
#[command(about = "Syntax tools for the Abla programming language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by the commands that parse.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Require a line break or ';' between statements on the same line
    #[arg(long = "strict-terminators")]
    pub strict_terminators: bool,
}

impl ParseOptions {
    pub fn parser_config(self) -> ParserConfig {
        let fallthrough = if self.strict_terminators {
            Fallthrough::Reject
        } else {
            Fallthrough::Accept
        };
        ParserConfig::new().with_fallthrough(fallthrough)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Include hidden-channel tokens (whitespace, line breaks, comments)
        #[arg(long)]
        hidden: bool,
    },

    /// Parse a file and print its AST
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        options: ParseOptions,
    },

    /// Parse a file and report diagnostics only
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        options: ParseOptions,
    },

    /// Show the statement-terminator predicates for every visible token
    Terminators {
        /// Source file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        options: ParseOptions,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file, hidden } => commands::lex_file(&file.to_string_lossy(), hidden),
        Command::Parse { file, options } => commands::parse_file(&file.to_string_lossy(), &options.parser_config()),
        Command::Check { file, options } => commands::check_file(&file.to_string_lossy(), &options.parser_config()),
        Command::Terminators { file, options } => {
            commands::terminators_file(&file.to_string_lossy(), &options.parser_config())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["abla", "lex", "main.abla", "--hidden"]).unwrap();
        if let Command::Lex { file, hidden } = cli.command {
            assert_eq!(file, PathBuf::from("main.abla"));
            assert!(hidden);
        } else {
            panic!("Expected Lex command");
        }
    }

    #[test]
    fn test_cli_parse_defaults_to_accepting_fallthrough() {
        let cli = Cli::try_parse_from(["abla", "parse", "main.abla"]).unwrap();
        if let Command::Parse { options, .. } = cli.command {
            assert!(!options.strict_terminators);
            assert_eq!(options.parser_config(), ParserConfig::default());
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_parse_strict_terminators() {
        let cli = Cli::try_parse_from(["abla", "check", "main.abla", "--strict-terminators"]).unwrap();
        if let Command::Check { options, .. } = cli.command {
            assert_eq!(
                options.parser_config().terminators.fallthrough,
                Fallthrough::Reject
            );
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_terminators() {
        let cli = Cli::try_parse_from(["abla", "terminators", "main.abla"]).unwrap();
        assert!(matches!(cli.command, Command::Terminators { .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["abla"]).is_err());
    }

    #[test]
    fn test_cli_error_display() {
        let err = CliError::failure("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}

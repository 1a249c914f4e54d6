// Public parsing API.

/// Parse a token stream into a [`File`] with the default [`ParserConfig`].
///
/// ## Errors
/// Returns all syntax errors found during parsing.
pub fn parse(stream: &TokenStream) -> Result<File, Vec<SyntaxError>> {
    parse_with_config(stream, &ParserConfig::default())
}

/// Parse a token stream into a [`File`] with an explicit [`ParserConfig`].
///
/// ## Errors
/// Returns all syntax errors found during parsing.
#[tracing::instrument(skip_all, fields(token_count = stream.len(), fallthrough = ?config.terminators.fallthrough))]
pub fn parse_with_config(stream: &TokenStream, config: &ParserConfig) -> Result<File, Vec<SyntaxError>> {
    let result = Parser::new(stream, *config).parse();
    match &result {
        Ok(file) => tracing::debug!(declarations = file.declarations.len(), "parsed file"),
        Err(errors) => tracing::debug!(errors = errors.len(), "parse failed"),
    }
    result
}

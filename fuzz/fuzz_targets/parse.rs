#![no_main]

use abla_syntax::parser::{self, ParserConfig};
use abla_syntax::{lexer, predicates};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            assert_eq!(tokens.source_text(), s);

            // The predicates must answer for every position, one past the end included
            let config = ParserConfig::strict().terminators;
            for index in 0..=tokens.len() {
                let _ = predicates::has_preceding_terminator(&tokens, index, &config);
                let _ = predicates::is_at_closing_delimiter(&tokens, index, &config);
            }

            let _ = parser::parse(&tokens);
            let _ = parser::parse_with_config(&tokens, &ParserConfig::strict());
        }
    }
});

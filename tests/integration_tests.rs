//! Integration tests for the Abla syntax tools
//!
//! These tests run the lexer, the terminator predicates and the parser together on whole programs and
//! snapshot the CLI renderings.

use abla::ast::{Declaration, Statement};
use abla::lexer;
use abla::parser::{self, ParserConfig};
use abla::predicates::{Fallthrough, TerminatorConfig};
use abla::render;

const SAMPLE: &str = r#"#include("std")

/* A point
   in the plane */
class Point(val x: Int, val y: Int) {
    fun len2(): Int = x * x + y * y
}

extern("libc") fun puts(s: String): Int

fun Int.double(): Int = this * 2

fun main() {
    var i = 0; val p = Point(1, 2)
    while (i < 10) {
        i = i + 1
    }
    val label = when (p.len2()) {
        5 -> "five"
        else -> "other"
    }
    puts("len: $label\n")
    [1, 2, 3].forEach { print(it) }
}
"#;

#[test]
fn test_sample_program_parses_in_both_modes() {
    let tokens = lexer::lex(SAMPLE).unwrap();
    assert_eq!(tokens.source_text(), SAMPLE);

    for config in [ParserConfig::default(), ParserConfig::strict()] {
        let file = parser::parse_with_config(&tokens, &config).unwrap();
        assert_eq!(file.declarations.len(), 5);
        assert!(matches!(file.declarations[0].node, Declaration::CompilerCall(_)));
        assert!(matches!(file.declarations[1].node, Declaration::Class(_)));

        match &file.declarations[4].node {
            Declaration::Function(main) => {
                assert_eq!(main.name, "main");
                let statements = &main.body.as_ref().unwrap().node.statements;
                assert_eq!(statements.len(), 6);
                assert!(matches!(statements[2].node, Statement::While(_)));
            }
            other => panic!("Expected main function, got {:?}", other),
        }
    }
}

#[test]
fn test_crlf_line_endings() {
    let source = "fun main() {\r\n    val a = 1\r\n    val b = 2\r\n}\r\n";
    let tokens = lexer::lex(source).unwrap();
    let file = parser::parse_with_config(&tokens, &ParserConfig::strict()).unwrap();
    match &file.declarations[0].node {
        Declaration::Function(f) => assert_eq!(f.body.as_ref().unwrap().node.statements.len(), 2),
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_same_line_statements_depend_on_fallthrough() {
    let source = "fun main() {\n    val a = 1 val b = 2\n}\n";
    let tokens = lexer::lex(source).unwrap();

    assert!(parser::parse(&tokens).is_ok());

    let errors = parser::parse_with_config(&tokens, &ParserConfig::strict()).unwrap_err();
    assert_eq!(errors.len(), 1);
    let rendered = render::format_errors("main.abla", source, &errors);
    assert!(rendered.contains("main.abla:2:15"), "got: {}", rendered);
    assert!(rendered.contains("separate statements on the same line with ';'"), "got: {}", rendered);
}

#[test]
fn test_token_dump_snapshot() {
    let tokens = lexer::lex("val x = 1 // c\nf()").unwrap();
    insta::assert_snapshot!(render::token_dump(&tokens, true), @r#"
    0: default val "val"
    1: hidden WS " "
    2: default Identifier "x"
    3: hidden WS " "
    4: default '=' "="
    5: hidden WS " "
    6: default IntegerLiteral "1"
    7: hidden WS " "
    8: hidden LineComment "// c"
    9: hidden NL "\n"
    10: default Identifier "f"
    11: default '(' "("
    12: default ')' ")"
    13: default EOF ""
    "#);
}

#[test]
fn test_visible_token_dump_snapshot() {
    let tokens = lexer::lex("a /* b */ c").unwrap();
    insta::assert_snapshot!(render::token_dump(&tokens, false), @r#"
    0: default Identifier "a"
    4: default Identifier "c"
    5: default EOF ""
    "#);
}

const LOOKBACK_SOURCE: &str = "a b\nc /* x */ d /* \n */ }";

#[test]
fn test_terminator_report_strict_snapshot() {
    let tokens = lexer::lex(LOOKBACK_SOURCE).unwrap();
    let config = TerminatorConfig::abla().with_fallthrough(Fallthrough::Reject);
    insta::assert_snapshot!(render::terminator_report(&tokens, config), @r#"
    0: Identifier "a" terminator=true closing=false (start of stream)
    2: Identifier "b" terminator=false closing=false (follows 0)
    4: Identifier "c" terminator=true closing=false (line break at 3)
    8: Identifier "d" terminator=false closing=false (follows 4)
    12: '}' "}" terminator=true closing=true (multi-line comment at 10)
    13: EOF "" terminator=false closing=false (follows 12)
    "#);
}

#[test]
fn test_terminator_report_default_snapshot() {
    let tokens = lexer::lex(LOOKBACK_SOURCE).unwrap();
    insta::assert_snapshot!(render::terminator_report(&tokens, TerminatorConfig::abla()), @r#"
    0: Identifier "a" terminator=true closing=false (start of stream)
    2: Identifier "b" terminator=true closing=false (follows 0)
    4: Identifier "c" terminator=true closing=false (line break at 3)
    8: Identifier "d" terminator=true closing=false (follows 4)
    12: '}' "}" terminator=true closing=true (multi-line comment at 10)
    13: EOF "" terminator=true closing=false (follows 12)
    "#);
}

//! Reserved keyword vocabulary for Abla.
//!
//! A stable identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) recording the
//! spelling and category of every reserved word.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This registry is pure: the lexer resolves identifier spellings through it, the parser matches on ids.
//!
//! ## Examples
//! ```rust
//! use abla_syntax::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("fun"), Some(KeywordId::Fun));
//! assert_eq!(keywords::as_str(KeywordId::When), "when");
//! assert_eq!(keywords::from_str("Fun"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Fun,
    Class,
    Val,
    Var,

    // Control flow
    While,
    If,
    Else,
    When,

    // Literals
    Null,

    // Modifiers
    Extern,
    Compiler,
    Abstract,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    ControlFlow,
    Literal,
    Modifier,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Fun, "fun", KeywordCategory::Declaration),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Val, "val", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::When, "when", KeywordCategory::ControlFlow),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    info(KeywordId::Extern, "extern", KeywordCategory::Modifier),
    info(KeywordId::Compiler, "compiler", KeywordCategory::Modifier),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    match id {
        KeywordId::Fun => "fun",
        KeywordId::Class => "class",
        KeywordId::Val => "val",
        KeywordId::Var => "var",
        KeywordId::While => "while",
        KeywordId::If => "if",
        KeywordId::Else => "else",
        KeywordId::When => "when",
        KeywordId::Null => "null",
        KeywordId::Extern => "extern",
        KeywordId::Compiler => "compiler",
        KeywordId::Abstract => "abstract",
    }
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

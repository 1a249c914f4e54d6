//! Abstract Syntax Tree definitions for Abla
//!
//! This module defines the AST node types produced by [`crate::parser`]. Every node that maps back to
//! source text is wrapped in [`Spanned`].

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// Line/column location of a token start (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed source file: an ordered list of top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub declarations: Vec<Spanned<Declaration>>,
}

/// Declarations allowed at file level and inside class bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
    Property(PropertyDecl),
    /// `#callee(args)`: a call evaluated by the compiler at declaration level.
    CompilerCall(Spanned<Expr>),
}

// ============================================================================
// Modifiers and annotations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// `extern` or `extern("abi")`
    Extern(Option<String>),
    /// `compiler`: the item only exists at compile time
    Compiler,
    Abstract,
}

/// `@Name` or `@Name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Ident,
    pub args: Vec<Spanned<Argument>>,
}

/// Modifier list preceding a declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifiers {
    pub modifiers: Vec<Spanned<Modifier>>,
    pub annotations: Vec<Spanned<Annotation>>,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.annotations.is_empty()
    }
}

// ============================================================================
// Functions, classes, properties
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub modifiers: Modifiers,
    /// Receiver type for extension functions: `fun Int.double(): Int`
    pub receiver: Option<Spanned<Type>>,
    pub name: Ident,
    pub params: Vec<Spanned<Param>>,
    pub return_type: Option<Spanned<Type>>,
    /// `None` for bodiless (e.g. `extern`) functions. An `= expr` body is stored as a one-statement block.
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Spanned<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub modifiers: Modifiers,
    pub name: Ident,
    pub constructor: Option<Spanned<ClassConstructor>>,
    pub members: Vec<Spanned<Declaration>>,
}

/// Primary constructor: `class Point(val x: Int, y: Int)`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassConstructor {
    pub params: Vec<Spanned<ConstructorParam>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorParam {
    /// `val`/`var` parameters become properties of the class.
    Property(PropertyDecl),
    Param(Param),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub modifiers: Modifiers,
    /// `true` for `val`, `false` for `var`
    pub readonly: bool,
    pub name: Ident,
    pub ty: Option<Spanned<Type>>,
    pub value: Option<Spanned<Expr>>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `Name`, `Name<Args>`, `Outer.Inner<Args>`
    User(UserType),
    /// `T?`
    Nullable(Box<Spanned<Type>>),
    /// `T*`
    Pointer(Box<Spanned<Type>>),
    /// `(A, name: B) -> R` or `Recv.(A) -> R`
    Function(FunctionType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserType {
    pub parent: Option<Box<UserType>>,
    pub name: Ident,
    pub args: Vec<Spanned<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub receiver: Option<Box<Spanned<Type>>>,
    /// Parameter names are optional in function types.
    pub params: Vec<(Option<Ident>, Spanned<Type>)>,
    pub ret: Box<Spanned<Type>>,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{}.", parent)?;
        }
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg.node)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::User(user) => write!(f, "{}", user),
            Type::Nullable(inner) => write!(f, "{}?", inner.node),
            Type::Pointer(inner) => write!(f, "{}*", inner.node),
            Type::Function(func) => {
                if let Some(receiver) = &func.receiver {
                    write!(f, "{}.", receiver.node)?;
                }
                write!(f, "(")?;
                for (i, (name, ty)) in func.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(name) = name {
                        write!(f, "{}: ", name)?;
                    }
                    write!(f, "{}", ty.node)?;
                }
                write!(f, ") -> {}", func.ret.node)
            }
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expr),
    Property(PropertyDecl),
    While(WhileStmt),
    Function(FunctionDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Spanned<Block>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Mul,
    Div,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThanEqual => "<=",
            BinaryOp::GreaterThanEqual => ">=",
        };
        write!(f, "{}", s)
    }
}

/// Call argument, optionally named: `f(x, limit = 3)`
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<Ident>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Text(String),
    /// `$name` reference inside a string literal
    Ref(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WhenCase {
    /// `a, b -> body`
    Match {
        conditions: Vec<Spanned<Expr>>,
        body: Spanned<Block>,
    },
    /// `else -> body`
    Else(Spanned<Block>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    /// Integer literal, kept in its source spelling (base prefixes and `_` separators included).
    Integer(String),
    String(Vec<StringPart>),
    Null,
    Array(Vec<Spanned<Expr>>),
    /// `{ statements }`
    FunctionLiteral(Block),
    Call {
        callee: Box<Spanned<Expr>>,
        args: Vec<Spanned<Argument>>,
    },
    Member {
        target: Box<Spanned<Expr>>,
        name: Ident,
    },
    Index {
        target: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    Assign {
        target: Box<Spanned<Expr>>,
        value: Box<Spanned<Expr>>,
    },
    /// `#expr`: evaluated by the compiler
    CompilerExec(Box<Spanned<Expr>>),
    If {
        condition: Box<Spanned<Expr>>,
        then_body: Spanned<Block>,
        else_body: Option<Spanned<Block>>,
    },
    When {
        subject: Option<Box<Spanned<Expr>>>,
        cases: Vec<Spanned<WhenCase>>,
    },
}

//! Code fragments of the target language.
//!
//! A `Code` is an opaque, composable piece of Go syntax. Fragments are
//! built through the functions in `target::go`, composed into larger
//! fragments, and only interpreted by the layout in `target::pretty`.
use crate::common::prettify::prettify_width;
use crate::common::prettify::DEFAULT_WIDTH;
use crate::target::imports::ImportRegistry;
use crate::target::pretty::Printed;
use std::fmt::{self, Display};

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Int(i64),
    /// Integer literal kept as its decimal digits
    BigInt(String),
    Float(f64),
    Str(String),
    /// String literal from raw bytes, escaping anything non-printable
    Bytes(Vec<u8>),
    Bool(bool),
    Nil,
}

/// A parameter of a function signature
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Code,
}

/// Parameters and results of a function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Code>,
}

/// The `else` arm of an `if`
#[derive(Debug, Clone, PartialEq)]
pub enum Else {
    Block(Vec<Code>),
    /// `else if ...`, holding a `Code::If`
    If(Box<Code>),
}

/// The header of a `for` statement
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// `for {`
    Forever,
    /// `for cond {`
    Cond(Box<Code>),
    /// `for init; cond; post {`
    Clause {
        init: Option<Box<Code>>,
        cond: Option<Box<Code>>,
        post: Option<Box<Code>>,
    },
    /// `for vars := range expr {`
    Range {
        vars: Vec<Code>,
        define: bool,
        expr: Box<Code>,
    },
}

/// A `case` (or, with no expressions, the `default`) arm of a switch
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub exprs: Vec<Code>,
    pub body: Vec<Code>,
}

/// A line in a struct declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Comment(String),
    Named {
        name: String,
        ty: Code,
        comment: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    Lit(Lit),
    Id(String),
    /// A reference into an imported package, by import path
    Qual { path: String, name: String },
    /// `x.name`
    Dot(Box<Code>, String),
    /// Binary operation with a Go operator token
    Binary(Box<Code>, &'static str, Box<Code>),
    /// Prefix operation with a Go operator token
    Unary(&'static str, Box<Code>),
    Paren(Box<Code>),
    Call(Box<Code>, Vec<Code>),
    Index(Box<Code>, Box<Code>),
    /// `x[lo:hi]`
    Slice(Box<Code>, Option<Box<Code>>, Option<Box<Code>>),
    /// `x.(T)`
    TypeAssert(Box<Code>, Box<Code>),
    /// `T{a, b}`
    Composite(Box<Code>, Vec<Code>),
    /// `T{k: v}`
    KeyedComposite(Box<Code>, Vec<(Code, Code)>),
    /// `func(params) results { body }`
    FuncLit(Signature, Vec<Code>),
    /// `chan T`
    ChanOf(Box<Code>),
    /// `[]T`
    SliceOf(Box<Code>),
    /// `*T`
    PointerTo(Box<Code>),
    /// `x /* comment */`
    Commented(Box<Code>, String),
    /// `/*comment*/x`
    Annotated(String, Box<Code>),

    // === Statements ===
    /// Line comment(s)
    Comment(String),
    /// `lhs op rhs` for `=`, `:=` and the `op=` forms
    Assign(Vec<Code>, &'static str, Vec<Code>),
    /// `var names ty = values`
    VarDecl {
        names: Vec<String>,
        ty: Option<Box<Code>>,
        values: Vec<Code>,
    },
    Return(Vec<Code>),
    Break,
    Continue,
    Go(Box<Code>),
    Defer(Box<Code>),
    /// `ch <- v`
    Send(Box<Code>, Box<Code>),
    Block(Vec<Code>),
    If {
        init: Option<Box<Code>>,
        cond: Box<Code>,
        then: Vec<Code>,
        otherwise: Option<Else>,
    },
    For {
        header: ForHeader,
        body: Vec<Code>,
    },
    Switch {
        tag: Option<Box<Code>>,
        cases: Vec<Case>,
    },

    // === Declarations ===
    FuncDecl {
        recv: Option<Box<Param>>,
        name: String,
        sig: Signature,
        body: Vec<Code>,
    },
    TypeStruct {
        name: String,
        fields: Vec<Field>,
    },
    /// Statement followed by a `// comment` on the same line
    Trailing(Box<Code>, String),
}

impl Code {
    /// Declarations may appear at package level
    pub fn is_declaration(&self) -> bool {
        match self {
            Code::FuncDecl { .. } | Code::TypeStruct { .. } => true,
            Code::Trailing(inner, _) => inner.is_declaration(),
            _ => false,
        }
    }
}

/// Standalone rendering; qualified references print with their
/// package's default local name.
impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imports = ImportRegistry::default();
        let text = prettify_width(&Printed::new(self, &imports), DEFAULT_WIDTH);
        write!(f, "{}", text)
    }
}

//! Source AST for the dynamically-typed input language.
//!
//! The tree is produced by an external parser and handed over as JSON
//! (one object per node, discriminated by a `kind` field, carrying
//! optional `line` / `col` fields). Field names follow the reference
//! language's own AST so that a dump of that AST maps directly.
//!
//! The node kinds form closed enums: the translators match them
//! exhaustively, so a new kind without a handler fails to compile.
use crate::common::pos::{HasPos, Pos};
use serde::Deserialize;

// =============================================================================
// Module
// =============================================================================

/// A module (one source file)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Module { body }
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A statement node
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
    #[serde(flatten)]
    pub pos: Pos,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt {
            kind,
            pos: Pos::default(),
        }
    }

    /// Same statement located at a source position
    pub fn at(self, line: u32, col: u32) -> Self {
        Stmt {
            pos: Pos::new(line, col),
            ..self
        }
    }
}

impl HasPos for Stmt {
    fn pos(&self) -> Pos {
        self.pos
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum StmtKind {
    /// Expression statement
    Expr { value: Box<Expr> },
    /// `a = b = value`
    Assign { targets: Vec<Expr>, value: Box<Expr> },
    /// `target op= value`
    AugAssign {
        target: Box<Expr>,
        op: BinOp,
        value: Box<Expr>,
    },
    /// `target: annotation = value`
    AnnAssign {
        target: Box<Expr>,
        annotation: Box<Expr>,
        #[serde(default)]
        value: Option<Box<Expr>>,
        #[serde(default)]
        simple: bool,
    },
    Return {
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    Delete { targets: Vec<Expr> },
    Pass,
    Break,
    Continue,
    /// `raise exc from cause`
    Raise {
        #[serde(default)]
        exc: Option<Box<Expr>>,
        #[serde(default)]
        cause: Option<Box<Expr>>,
    },
    Assert {
        test: Box<Expr>,
        #[serde(default)]
        msg: Option<Box<Expr>>,
    },
    Global { names: Vec<String> },
    Nonlocal { names: Vec<String> },
    /// `import x.y as z`
    Import { names: Vec<Alias> },
    /// `from module import name as alias`
    ImportFrom {
        #[serde(default)]
        module: Option<String>,
        names: Vec<Alias>,
        #[serde(default)]
        level: u32,
    },
    If {
        test: Box<Expr>,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    For {
        target: Box<Expr>,
        iter: Box<Expr>,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    AsyncFor {
        target: Box<Expr>,
        iter: Box<Expr>,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    While {
        test: Box<Expr>,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    With { items: Vec<WithItem>, body: Vec<Stmt> },
    AsyncWith { items: Vec<WithItem>, body: Vec<Stmt> },
    Try {
        body: Vec<Stmt>,
        #[serde(default)]
        handlers: Vec<ExceptHandler>,
        #[serde(default)]
        orelse: Vec<Stmt>,
        #[serde(default)]
        finalbody: Vec<Stmt>,
    },
    TryStar {
        body: Vec<Stmt>,
        #[serde(default)]
        handlers: Vec<ExceptHandler>,
        #[serde(default)]
        orelse: Vec<Stmt>,
        #[serde(default)]
        finalbody: Vec<Stmt>,
    },
    /// Pattern matching; patterns are not modelled
    Match {
        subject: Box<Expr>,
        #[serde(default)]
        cases: Vec<MatchCase>,
    },
    FunctionDef {
        name: String,
        #[serde(default)]
        args: Box<Arguments>,
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
        #[serde(default)]
        returns: Option<Box<Expr>>,
    },
    AsyncFunctionDef {
        name: String,
        #[serde(default)]
        args: Box<Arguments>,
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
        #[serde(default)]
        returns: Option<Box<Expr>>,
    },
    ClassDef {
        name: String,
        #[serde(default)]
        bases: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
    },
    /// `type X = value`
    TypeAlias { name: Box<Expr>, value: Box<Expr> },
}

impl StmtKind {
    /// Dynamic type tag used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        use self::StmtKind::*;

        match self {
            Expr { .. } => "ast.Expr",
            Assign { .. } => "ast.Assign",
            AugAssign { .. } => "ast.AugAssign",
            AnnAssign { .. } => "ast.AnnAssign",
            Return { .. } => "ast.Return",
            Delete { .. } => "ast.Delete",
            Pass => "ast.Pass",
            Break => "ast.Break",
            Continue => "ast.Continue",
            Raise { .. } => "ast.Raise",
            Assert { .. } => "ast.Assert",
            Global { .. } => "ast.Global",
            Nonlocal { .. } => "ast.Nonlocal",
            Import { .. } => "ast.Import",
            ImportFrom { .. } => "ast.ImportFrom",
            If { .. } => "ast.If",
            For { .. } => "ast.For",
            AsyncFor { .. } => "ast.AsyncFor",
            While { .. } => "ast.While",
            With { .. } => "ast.With",
            AsyncWith { .. } => "ast.AsyncWith",
            Try { .. } => "ast.Try",
            TryStar { .. } => "ast.TryStar",
            Match { .. } => "ast.Match",
            FunctionDef { .. } => "ast.FunctionDef",
            AsyncFunctionDef { .. } => "ast.AsyncFunctionDef",
            ClassDef { .. } => "ast.ClassDef",
            TypeAlias { .. } => "ast.TypeAlias",
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(flatten)]
    pub pos: Pos,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            pos: Pos::default(),
        }
    }

    /// Same expression located at a source position
    pub fn at(self, line: u32, col: u32) -> Self {
        Expr {
            pos: Pos::new(line, col),
            ..self
        }
    }

    /// The identifier if this is a bare name
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id } => Some(id),
            _ => None,
        }
    }

    /// True for string literals
    pub fn is_str(&self) -> bool {
        matches!(self.kind, ExprKind::Str { .. })
    }

    /// True for the absent-value singleton
    pub fn is_none(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::NameConstant {
                value: Singleton::None
            }
        )
    }
}

impl HasPos for Expr {
    fn pos(&self) -> Pos {
        self.pos
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum ExprKind {
    // === Literals ===
    Int { value: i64 },
    /// Integer literal too large for 64 bits, as decimal digits
    BigInt { digits: String },
    Float { value: f64 },
    Complex { real: f64, imag: f64 },
    Str { value: String },
    Bytes { value: Vec<u8> },
    /// `True`, `False` or `None`
    NameConstant { value: Singleton },
    Ellipsis,

    // === Names ===
    Name { id: String },
    /// `target := value`
    NamedExpr {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    // === Containers ===
    List {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Tuple {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Set {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    /// A `None` key marks `**mapping` unpacking
    Dict {
        #[serde(default)]
        keys: Vec<Option<Expr>>,
        #[serde(default)]
        values: Vec<Expr>,
    },

    // === Comprehensions ===
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    // === Operations ===
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    BoolOp { op: BoolOp, values: Vec<Expr> },
    /// `left ops[0] comparators[0] ops[1] comparators[1] ...`
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },

    // === Access ===
    Attribute { value: Box<Expr>, attr: String },
    Subscript { value: Box<Expr>, slice: Box<Expr> },
    Slice {
        #[serde(default)]
        lower: Option<Box<Expr>>,
        #[serde(default)]
        upper: Option<Box<Expr>>,
        #[serde(default)]
        step: Option<Box<Expr>>,
    },
    /// `*value` in calls and displays
    Starred { value: Box<Expr> },

    // === Calls ===
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },

    // === Functions and conditionals ===
    Lambda {
        #[serde(default)]
        args: Box<Arguments>,
        body: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },

    // === Suspension ===
    Await { value: Box<Expr> },
    Yield {
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    YieldFrom { value: Box<Expr> },

    // === Formatted strings ===
    JoinedStr { values: Vec<Expr> },
    FormattedValue {
        value: Box<Expr>,
        #[serde(default = "no_conversion")]
        conversion: i32,
        #[serde(default)]
        format_spec: Option<Box<Expr>>,
    },
}

fn no_conversion() -> i32 {
    -1
}

impl ExprKind {
    /// Dynamic type tag used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        use self::ExprKind::*;

        match self {
            Int { .. } => "ast.Int",
            BigInt { .. } => "ast.BigInt",
            Float { .. } => "ast.Float",
            Complex { .. } => "ast.Complex",
            Str { .. } => "ast.Str",
            Bytes { .. } => "ast.Bytes",
            NameConstant { .. } => "ast.NameConstant",
            Ellipsis => "ast.Ellipsis",
            Name { .. } => "ast.Name",
            NamedExpr { .. } => "ast.NamedExpr",
            List { .. } => "ast.List",
            Tuple { .. } => "ast.Tuple",
            Set { .. } => "ast.Set",
            Dict { .. } => "ast.Dict",
            ListComp { .. } => "ast.ListComp",
            SetComp { .. } => "ast.SetComp",
            DictComp { .. } => "ast.DictComp",
            GeneratorExp { .. } => "ast.GeneratorExp",
            BinOp { .. } => "ast.BinOp",
            UnaryOp { .. } => "ast.UnaryOp",
            BoolOp { .. } => "ast.BoolOp",
            Compare { .. } => "ast.Compare",
            Attribute { .. } => "ast.Attribute",
            Subscript { .. } => "ast.Subscript",
            Slice { .. } => "ast.Slice",
            Starred { .. } => "ast.Starred",
            Call { .. } => "ast.Call",
            Lambda { .. } => "ast.Lambda",
            IfExp { .. } => "ast.IfExp",
            Await { .. } => "ast.Await",
            Yield { .. } => "ast.Yield",
            YieldFrom { .. } => "ast.YieldFrom",
            JoinedStr { .. } => "ast.JoinedStr",
            FormattedValue { .. } => "ast.FormattedValue",
        }
    }
}

/// The three-valued singleton constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Singleton {
    True,
    False,
    None,
}

// =============================================================================
// Operators
// =============================================================================

/// Binary (and augmented assignment) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UnaryOp {
    UAdd,
    USub,
    Invert,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

// =============================================================================
// Supporting nodes
// =============================================================================

/// Formal parameters of a function or lambda
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub posonlyargs: Vec<Arg>,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub vararg: Option<Arg>,
    #[serde(default)]
    pub kwonlyargs: Vec<Arg>,
    /// Defaults for keyword-only parameters, aligned with `kwonlyargs`
    #[serde(default)]
    pub kw_defaults: Vec<Option<Expr>>,
    #[serde(default)]
    pub kwarg: Option<Arg>,
    /// Defaults for the last `defaults.len()` positional parameters
    #[serde(default)]
    pub defaults: Vec<Expr>,
}

impl Arguments {
    /// Positional parameters, position-only first
    pub fn positional(&self) -> impl Iterator<Item = &Arg> {
        self.posonlyargs.iter().chain(self.args.iter())
    }
}

/// A single formal parameter
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arg {
    pub arg: String,
    #[serde(default)]
    pub annotation: Option<Box<Expr>>,
    #[serde(flatten)]
    pub pos: Pos,
}

/// A keyword argument in a call (`arg` is absent for `**mapping`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub arg: Option<String>,
    pub value: Expr,
    #[serde(flatten)]
    pub pos: Pos,
}

/// `name as asname` in imports
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alias {
    pub name: String,
    #[serde(default)]
    pub asname: Option<String>,
}

/// One `for target in iter if cond...` clause of a comprehension
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    #[serde(default)]
    pub ifs: Vec<Expr>,
    #[serde(default)]
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExceptHandler {
    /// Exception type expression; absent for a bare `except:`
    #[serde(default, rename = "type")]
    pub typ: Option<Expr>,
    #[serde(default)]
    pub name: Option<String>,
    pub body: Vec<Stmt>,
    #[serde(flatten)]
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithItem {
    pub context_expr: Expr,
    #[serde(default)]
    pub optional_vars: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchCase {
    #[serde(default)]
    pub guard: Option<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_deserialise_expression() {
        let json = r#"{
            "kind": "BinOp",
            "line": 2,
            "col": 4,
            "left": { "kind": "Name", "id": "x" },
            "op": "Add",
            "right": { "kind": "Int", "value": 1 }
        }"#;
        let expr: Expr = serde_json::from_str(json).unwrap();
        assert_eq!(expr.pos, Pos::new(2, 4));
        match expr.kind {
            ExprKind::BinOp { left, op, right } => {
                assert_eq!(left.as_name(), Some("x"));
                assert_eq!(op, BinOp::Add);
                assert_eq!(right.kind, ExprKind::Int { value: 1 });
                assert!(!right.pos.is_valid());
            }
            _ => panic!("expected binop"),
        }
    }

    #[test]
    pub fn test_deserialise_statements() {
        let json = r#"{
            "body": [
                { "kind": "Pass", "line": 1 },
                {
                    "kind": "FunctionDef",
                    "name": "f",
                    "args": { "args": [ { "arg": "a" } ] },
                    "body": [ { "kind": "Return" } ]
                }
            ]
        }"#;
        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.body.len(), 2);
        assert_eq!(module.body[0].kind, StmtKind::Pass);
        assert_eq!(module.body[1].kind.kind_name(), "ast.FunctionDef");
    }

    #[test]
    pub fn test_singletons() {
        let json = r#"{ "kind": "NameConstant", "value": "None" }"#;
        let expr: Expr = serde_json::from_str(json).unwrap();
        assert!(expr.is_none());
    }
}

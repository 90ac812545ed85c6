//! Helpers for constructing synthetic AST nodes
use crate::syntax::ast::*;

fn boxed(e: Expr) -> Box<Expr> {
    Box::new(e)
}

/// Construct an identifier reference
pub fn name<T: AsRef<str>>(id: T) -> Expr {
    Expr::new(ExprKind::Name {
        id: id.as_ref().to_string(),
    })
}

/// Construct an integer literal
pub fn int(value: i64) -> Expr {
    Expr::new(ExprKind::Int { value })
}

/// Construct a float literal
pub fn float(value: f64) -> Expr {
    Expr::new(ExprKind::Float { value })
}

/// Construct a string literal
pub fn str<T: AsRef<str>>(value: T) -> Expr {
    Expr::new(ExprKind::Str {
        value: value.as_ref().to_string(),
    })
}

pub fn true_() -> Expr {
    Expr::new(ExprKind::NameConstant {
        value: Singleton::True,
    })
}

pub fn false_() -> Expr {
    Expr::new(ExprKind::NameConstant {
        value: Singleton::False,
    })
}

pub fn none() -> Expr {
    Expr::new(ExprKind::NameConstant {
        value: Singleton::None,
    })
}

pub fn list(elts: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::List { elts })
}

pub fn tuple(elts: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Tuple { elts })
}

pub fn dict(items: Vec<(Expr, Expr)>) -> Expr {
    let (keys, values) = items.into_iter().map(|(k, v)| (Some(k), v)).unzip();
    Expr::new(ExprKind::Dict { keys, values })
}

/// `value.attr`
pub fn attr<T: AsRef<str>>(value: Expr, attr: T) -> Expr {
    Expr::new(ExprKind::Attribute {
        value: boxed(value),
        attr: attr.as_ref().to_string(),
    })
}

/// `value[index]`
pub fn subscript(value: Expr, index: Expr) -> Expr {
    Expr::new(ExprKind::Subscript {
        value: boxed(value),
        slice: boxed(index),
    })
}

/// `lower:upper:step`
pub fn slice(lower: Option<Expr>, upper: Option<Expr>, step: Option<Expr>) -> Expr {
    Expr::new(ExprKind::Slice {
        lower: lower.map(boxed),
        upper: upper.map(boxed),
        step: step.map(boxed),
    })
}

pub fn starred(value: Expr) -> Expr {
    Expr::new(ExprKind::Starred {
        value: boxed(value),
    })
}

/// Call with positional arguments only
pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    call_kw(func, args, vec![])
}

/// Call with keyword arguments as `(name, value)` pairs
pub fn call_kw(func: Expr, args: Vec<Expr>, keywords: Vec<(&str, Expr)>) -> Expr {
    Expr::new(ExprKind::Call {
        func: boxed(func),
        args,
        keywords: keywords
            .into_iter()
            .map(|(k, v)| keyword(Some(k), v))
            .collect(),
    })
}

pub fn keyword(arg: Option<&str>, value: Expr) -> Keyword {
    Keyword {
        arg: arg.map(|s| s.to_string()),
        value,
        pos: Default::default(),
    }
}

pub fn binop(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::new(ExprKind::BinOp {
        left: boxed(left),
        op,
        right: boxed(right),
    })
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(ExprKind::UnaryOp {
        op,
        operand: boxed(operand),
    })
}

pub fn boolop(op: BoolOp, values: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::BoolOp { op, values })
}

/// A single comparison `left op right`
pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Expr {
    compare_chain(left, vec![(op, right)])
}

/// A comparison chain `left op1 c1 op2 c2 ...`
pub fn compare_chain(left: Expr, rest: Vec<(CmpOp, Expr)>) -> Expr {
    let (ops, comparators) = rest.into_iter().unzip();
    Expr::new(ExprKind::Compare {
        left: boxed(left),
        ops,
        comparators,
    })
}

pub fn if_exp(test: Expr, body: Expr, orelse: Expr) -> Expr {
    Expr::new(ExprKind::IfExp {
        test: boxed(test),
        body: boxed(body),
        orelse: boxed(orelse),
    })
}

pub fn lambda(params: &[&str], body: Expr) -> Expr {
    Expr::new(ExprKind::Lambda {
        args: Box::new(arguments(params)),
        body: boxed(body),
    })
}

/// `for target in iter if ifs...`
pub fn comprehension(target: Expr, iter: Expr, ifs: Vec<Expr>) -> Comprehension {
    Comprehension {
        target,
        iter,
        ifs,
        is_async: false,
    }
}

pub fn list_comp(elt: Expr, generators: Vec<Comprehension>) -> Expr {
    Expr::new(ExprKind::ListComp {
        elt: boxed(elt),
        generators,
    })
}

pub fn dict_comp(key: Expr, value: Expr, generators: Vec<Comprehension>) -> Expr {
    Expr::new(ExprKind::DictComp {
        key: boxed(key),
        value: boxed(value),
        generators,
    })
}

pub fn generator_exp(elt: Expr, generators: Vec<Comprehension>) -> Expr {
    Expr::new(ExprKind::GeneratorExp {
        elt: boxed(elt),
        generators,
    })
}

/// Unannotated positional parameters
pub fn arguments(params: &[&str]) -> Arguments {
    Arguments {
        args: params.iter().map(|p| arg(p)).collect(),
        ..Default::default()
    }
}

pub fn arg<T: AsRef<str>>(name: T) -> Arg {
    Arg {
        arg: name.as_ref().to_string(),
        annotation: None,
        pos: Default::default(),
    }
}

pub fn alias(name: &str, asname: Option<&str>) -> Alias {
    Alias {
        name: name.to_string(),
        asname: asname.map(|s| s.to_string()),
    }
}

// === Statements ===

/// Expression statement
pub fn expr_stmt(value: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr {
        value: boxed(value),
    })
}

/// `target = value`
pub fn assign(target: Expr, value: Expr) -> Stmt {
    assign_many(vec![target], value)
}

/// `t1 = t2 = ... = value`
pub fn assign_many(targets: Vec<Expr>, value: Expr) -> Stmt {
    Stmt::new(StmtKind::Assign {
        targets,
        value: boxed(value),
    })
}

pub fn aug_assign(target: Expr, op: BinOp, value: Expr) -> Stmt {
    Stmt::new(StmtKind::AugAssign {
        target: boxed(target),
        op,
        value: boxed(value),
    })
}

pub fn ann_assign(target: Expr, annotation: Expr, value: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::AnnAssign {
        target: boxed(target),
        annotation: boxed(annotation),
        value: value.map(boxed),
        simple: true,
    })
}

pub fn ret(value: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Return {
        value: value.map(boxed),
    })
}

pub fn pass() -> Stmt {
    Stmt::new(StmtKind::Pass)
}

pub fn break_() -> Stmt {
    Stmt::new(StmtKind::Break)
}

pub fn continue_() -> Stmt {
    Stmt::new(StmtKind::Continue)
}

pub fn delete(targets: Vec<Expr>) -> Stmt {
    Stmt::new(StmtKind::Delete { targets })
}

pub fn raise(exc: Option<Expr>, cause: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Raise {
        exc: exc.map(boxed),
        cause: cause.map(boxed),
    })
}

pub fn assert(test: Expr, msg: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Assert {
        test: boxed(test),
        msg: msg.map(boxed),
    })
}

pub fn global(names: &[&str]) -> Stmt {
    Stmt::new(StmtKind::Global {
        names: names.iter().map(|s| s.to_string()).collect(),
    })
}

pub fn import(names: Vec<Alias>) -> Stmt {
    Stmt::new(StmtKind::Import { names })
}

pub fn import_from(module: &str, names: Vec<Alias>) -> Stmt {
    Stmt::new(StmtKind::ImportFrom {
        module: Some(module.to_string()),
        names,
        level: 0,
    })
}

pub fn if_(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::If {
        test: boxed(test),
        body,
        orelse,
    })
}

pub fn while_(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::While {
        test: boxed(test),
        body,
        orelse,
    })
}

pub fn for_(target: Expr, iter: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::For {
        target: boxed(target),
        iter: boxed(iter),
        body,
        orelse,
    })
}

/// `with context as alias: body`
pub fn with(items: Vec<(Expr, Option<Expr>)>, body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::With {
        items: items
            .into_iter()
            .map(|(context_expr, optional_vars)| WithItem {
                context_expr,
                optional_vars,
            })
            .collect(),
        body,
    })
}

pub fn try_(
    body: Vec<Stmt>,
    handlers: Vec<ExceptHandler>,
    orelse: Vec<Stmt>,
    finalbody: Vec<Stmt>,
) -> Stmt {
    Stmt::new(StmtKind::Try {
        body,
        handlers,
        orelse,
        finalbody,
    })
}

/// `except typ as name: body`
pub fn handler(typ: Option<Expr>, name: Option<&str>, body: Vec<Stmt>) -> ExceptHandler {
    ExceptHandler {
        typ,
        name: name.map(|s| s.to_string()),
        body,
        pos: Default::default(),
    }
}

/// Undecorated function definition with unannotated parameters
pub fn def(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    def_full(name, arguments(params), body, vec![], None)
}

pub fn def_full(
    name: &str,
    args: Arguments,
    body: Vec<Stmt>,
    decorator_list: Vec<Expr>,
    returns: Option<Expr>,
) -> Stmt {
    Stmt::new(StmtKind::FunctionDef {
        name: name.to_string(),
        args: Box::new(args),
        body,
        decorator_list,
        returns: returns.map(boxed),
    })
}

pub fn class(name: &str, bases: Vec<Expr>, body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::ClassDef {
        name: name.to_string(),
        bases,
        keywords: vec![],
        body,
        decorator_list: vec![],
    })
}

/// `yield value` as a statement
pub fn yield_(value: Option<Expr>) -> Stmt {
    expr_stmt(Expr::new(ExprKind::Yield {
        value: value.map(boxed),
    }))
}

pub fn module(body: Vec<Stmt>) -> Module {
    Module::new(body)
}

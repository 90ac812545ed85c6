//! Builder API for target code fragments.
//!
//! Everything the translator emits is composed through these
//! functions; none of them inspect the fragments they are given.
use crate::target::code::*;

fn boxed(c: Code) -> Box<Code> {
    Box::new(c)
}

// === Literals ===

pub fn int(i: i64) -> Code {
    Code::Lit(Lit::Int(i))
}

/// Integer literal outside the 64 bit range, from its decimal digits
pub fn big_int<T: AsRef<str>>(digits: T) -> Code {
    Code::Lit(Lit::BigInt(digits.as_ref().to_string()))
}

/// Float literal; non-finite values go through the `math` package
pub fn float(f: f64) -> Code {
    if f.is_nan() {
        call(qual("math", "NaN"), vec![])
    } else if f.is_infinite() {
        let sign = if f > 0.0 { 1 } else { -1 };
        call(qual("math", "Inf"), vec![int(sign)])
    } else {
        Code::Lit(Lit::Float(f))
    }
}

/// Complex literal via the `complex` builtin
pub fn complex(real: f64, imag: f64) -> Code {
    call(id("complex"), vec![float(real), float(imag)])
}

pub fn string<T: AsRef<str>>(s: T) -> Code {
    Code::Lit(Lit::Str(s.as_ref().to_string()))
}

/// `[]byte("...")`
pub fn bytes(b: &[u8]) -> Code {
    call(slice_of(id("byte")), vec![Code::Lit(Lit::Bytes(b.to_vec()))])
}

pub fn bool(b: bool) -> Code {
    Code::Lit(Lit::Bool(b))
}

pub fn nil() -> Code {
    Code::Lit(Lit::Nil)
}

// === References ===

pub fn id<T: AsRef<str>>(name: T) -> Code {
    Code::Id(name.as_ref().to_string())
}

/// Reference to `name` in the package imported from `path`
pub fn qual<P: AsRef<str>, N: AsRef<str>>(path: P, name: N) -> Code {
    Code::Qual {
        path: path.as_ref().to_string(),
        name: name.as_ref().to_string(),
    }
}

/// Field or method selection `x.name`
pub fn dot<T: AsRef<str>>(x: Code, name: T) -> Code {
    Code::Dot(boxed(x), name.as_ref().to_string())
}

// === Operators ===

pub fn binary(left: Code, op: &'static str, right: Code) -> Code {
    Code::Binary(boxed(left), op, boxed(right))
}

pub fn unary(op: &'static str, operand: Code) -> Code {
    Code::Unary(op, boxed(operand))
}

pub fn not(operand: Code) -> Code {
    unary("!", operand)
}

/// Left-nested conjunction; a single element is returned as is
pub fn and_all(mut terms: Vec<Code>) -> Code {
    if terms.is_empty() {
        return bool(true);
    }
    let first = terms.remove(0);
    terms
        .into_iter()
        .fold(first, |acc, t| binary(acc, "&&", t))
}

pub fn paren(x: Code) -> Code {
    Code::Paren(boxed(x))
}

// === Postfix forms ===

pub fn call(func: Code, args: Vec<Code>) -> Code {
    Code::Call(boxed(func), args)
}

pub fn index(x: Code, i: Code) -> Code {
    Code::Index(boxed(x), boxed(i))
}

/// `x[lo:hi]`, bounds optional
pub fn slice(x: Code, lo: Option<Code>, hi: Option<Code>) -> Code {
    Code::Slice(boxed(x), lo.map(boxed), hi.map(boxed))
}

pub fn type_assert(x: Code, ty: Code) -> Code {
    Code::TypeAssert(boxed(x), boxed(ty))
}

// === Composites and types ===

pub fn composite(ty: Code, elts: Vec<Code>) -> Code {
    Code::Composite(boxed(ty), elts)
}

pub fn keyed(ty: Code, pairs: Vec<(Code, Code)>) -> Code {
    Code::KeyedComposite(boxed(ty), pairs)
}

pub fn chan_of(ty: Code) -> Code {
    Code::ChanOf(boxed(ty))
}

pub fn slice_of(ty: Code) -> Code {
    Code::SliceOf(boxed(ty))
}

pub fn pointer_to(ty: Code) -> Code {
    Code::PointerTo(boxed(ty))
}

// === Functions ===

pub fn param<T: AsRef<str>>(name: T, ty: Code) -> Param {
    Param {
        name: name.as_ref().to_string(),
        ty,
    }
}

pub fn signature(params: Vec<Param>, results: Vec<Code>) -> Signature {
    Signature { params, results }
}

pub fn func_lit(sig: Signature, body: Vec<Code>) -> Code {
    Code::FuncLit(sig, body)
}

/// Immediately invoked closure `func() results { body }()`
pub fn iife(results: Vec<Code>, body: Vec<Code>) -> Code {
    call(func_lit(signature(vec![], results), body), vec![])
}

pub fn func_decl<T: AsRef<str>>(
    recv: Option<Param>,
    name: T,
    sig: Signature,
    body: Vec<Code>,
) -> Code {
    Code::FuncDecl {
        recv: recv.map(Box::new),
        name: name.as_ref().to_string(),
        sig,
        body,
    }
}

// === Structs ===

pub fn field<T: AsRef<str>>(name: T, ty: Code, comment: Option<String>) -> Field {
    Field::Named {
        name: name.as_ref().to_string(),
        ty,
        comment,
    }
}

pub fn field_comment<T: AsRef<str>>(text: T) -> Field {
    Field::Comment(text.as_ref().to_string())
}

pub fn struct_decl<T: AsRef<str>>(name: T, fields: Vec<Field>) -> Code {
    Code::TypeStruct {
        name: name.as_ref().to_string(),
        fields,
    }
}

// === Comments ===

/// Line comment; multi-line text yields one comment line per line
pub fn comment<T: AsRef<str>>(text: T) -> Code {
    Code::Comment(text.as_ref().to_string())
}

/// `x /*text*/`
pub fn commented<T: AsRef<str>>(x: Code, text: T) -> Code {
    Code::Commented(boxed(x), text.as_ref().to_string())
}

/// `/*text*/x`
pub fn annotated<T: AsRef<str>>(text: T, x: Code) -> Code {
    Code::Annotated(text.as_ref().to_string(), boxed(x))
}

/// `stmt // text`
pub fn trailing<T: AsRef<str>>(stmt: Code, text: T) -> Code {
    Code::Trailing(boxed(stmt), text.as_ref().to_string())
}

// === Statements ===

pub fn assign(lhs: Vec<Code>, rhs: Vec<Code>) -> Code {
    Code::Assign(lhs, "=", rhs)
}

/// Short variable declaration `lhs := rhs`
pub fn define(lhs: Vec<Code>, rhs: Vec<Code>) -> Code {
    Code::Assign(lhs, ":=", rhs)
}

/// Compound assignment such as `x += 1`; `op` includes the `=`
pub fn op_assign(lhs: Code, op: &'static str, rhs: Code) -> Code {
    Code::Assign(vec![lhs], op, vec![rhs])
}

pub fn var_decl(names: Vec<String>, ty: Option<Code>, values: Vec<Code>) -> Code {
    Code::VarDecl {
        names,
        ty: ty.map(boxed),
        values,
    }
}

pub fn ret(values: Vec<Code>) -> Code {
    Code::Return(values)
}

pub fn break_() -> Code {
    Code::Break
}

pub fn continue_() -> Code {
    Code::Continue
}

pub fn go(call: Code) -> Code {
    Code::Go(boxed(call))
}

pub fn defer(call: Code) -> Code {
    Code::Defer(boxed(call))
}

pub fn send(ch: Code, value: Code) -> Code {
    Code::Send(boxed(ch), boxed(value))
}

pub fn block(body: Vec<Code>) -> Code {
    Code::Block(body)
}

pub fn if_(cond: Code, then: Vec<Code>, otherwise: Option<Else>) -> Code {
    Code::If {
        init: None,
        cond: boxed(cond),
        then,
        otherwise,
    }
}

/// `if init; cond { then } else ...`
pub fn if_init(init: Code, cond: Code, then: Vec<Code>, otherwise: Option<Else>) -> Code {
    Code::If {
        init: Some(boxed(init)),
        cond: boxed(cond),
        then,
        otherwise,
    }
}

pub fn else_block(body: Vec<Code>) -> Else {
    Else::Block(body)
}

/// `else if`, given an `if` fragment
pub fn else_if(if_stmt: Code) -> Else {
    Else::If(boxed(if_stmt))
}

pub fn for_ever(body: Vec<Code>) -> Code {
    Code::For {
        header: ForHeader::Forever,
        body,
    }
}

pub fn for_cond(cond: Code, body: Vec<Code>) -> Code {
    Code::For {
        header: ForHeader::Cond(boxed(cond)),
        body,
    }
}

pub fn for_clause(init: Option<Code>, cond: Option<Code>, post: Option<Code>, body: Vec<Code>) -> Code {
    Code::For {
        header: ForHeader::Clause {
            init: init.map(boxed),
            cond: cond.map(boxed),
            post: post.map(boxed),
        },
        body,
    }
}

/// `for vars := range expr` (or `=` when not `define`)
pub fn for_range(vars: Vec<Code>, define: bool, expr: Code, body: Vec<Code>) -> Code {
    Code::For {
        header: ForHeader::Range {
            vars,
            define,
            expr: boxed(expr),
        },
        body,
    }
}

pub fn switch(tag: Option<Code>, cases: Vec<Case>) -> Code {
    Code::Switch {
        tag: tag.map(boxed),
        cases,
    }
}

pub fn case(exprs: Vec<Code>, body: Vec<Code>) -> Case {
    Case { exprs, body }
}

pub fn default(body: Vec<Code>) -> Case {
    Case {
        exprs: vec![],
        body,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_non_finite_floats() {
        assert_eq!(float(f64::INFINITY), call(qual("math", "Inf"), vec![int(1)]));
        assert_eq!(float(f64::NAN), call(qual("math", "NaN"), vec![]));
        assert_eq!(float(1.5), Code::Lit(Lit::Float(1.5)));
    }

    #[test]
    pub fn test_and_all() {
        assert_eq!(and_all(vec![]), bool(true));
        assert_eq!(and_all(vec![id("a")]), id("a"));
        assert_eq!(
            and_all(vec![id("a"), id("b"), id("c")]),
            binary(binary(id("a"), "&&", id("b")), "&&", id("c"))
        );
    }
}

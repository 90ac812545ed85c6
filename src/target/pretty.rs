//! Layout of code fragments as Go source text.
use crate::common::prettify::ToPretty;
use crate::target::code::*;
use crate::target::imports::ImportRegistry;
use pretty::{DocAllocator, DocBuilder};

const INDENT: isize = 4;

/// A fragment ready for layout, resolving qualified references
/// through an import registry.
pub struct Printed<'a> {
    code: &'a Code,
    imports: &'a ImportRegistry,
}

impl<'a> Printed<'a> {
    pub fn new(code: &'a Code, imports: &'a ImportRegistry) -> Self {
        Printed { code, imports }
    }
}

impl<'a> ToPretty for Printed<'a> {
    fn pretty<'b, D, A>(&'b self, allocator: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        code_doc(self.code, self.imports, allocator)
    }
}

/// Lay out a single fragment
pub fn code_doc<'b, D, A>(
    code: &'b Code,
    imports: &'b ImportRegistry,
    allocator: &'b D,
) -> DocBuilder<'b, D, A>
where
    D: DocAllocator<'b, A>,
    D::Doc: Clone,
    A: Clone,
{
    Layout { imports }.code(code, allocator)
}

/// Binding strength of a Go binary operator
fn precedence(op: &str) -> u8 {
    match op {
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        "+" | "-" | "|" | "^" => 4,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "&&" => 2,
        _ => 1,
    }
}

/// Quote as a Go interpreted string literal
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote raw bytes, escaping everything outside printable ASCII
pub fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(*b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push('"');
    out
}

/// Comment text safe inside `/* */` on a single line
fn inline_comment(text: &str) -> String {
    text.replace("*/", "* /").replace('\n', " ")
}

fn float_text(f: f64) -> String {
    format!("{:?}", f)
}

struct Layout<'b> {
    imports: &'b ImportRegistry,
}

impl<'b> Layout<'b> {
    fn code<D, A>(&self, code: &'b Code, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match code {
            Code::Lit(lit) => self.lit(lit, a),
            Code::Id(name) => a.text(name.as_str()),
            Code::Qual { path, name } => {
                a.text(format!("{}.{}", self.imports.local_name(path), name))
            }
            Code::Dot(x, name) => self.postfix(x, a).append(".").append(name.as_str()),
            Code::Binary(l, op, r) => {
                let prec = precedence(op);
                self.operand(l, prec, false, a)
                    .append(a.text(format!(" {} ", op)))
                    .append(self.operand(r, prec, true, a))
            }
            Code::Unary(op, x) => {
                let wrap = match &**x {
                    Code::Binary(..) | Code::Unary(..) => true,
                    Code::Lit(Lit::Int(i)) => *i < 0,
                    Code::Lit(Lit::Float(f)) => *f < 0.0,
                    _ => false,
                };
                let inner = self.code(x, a);
                a.text(*op)
                    .append(if wrap { Self::parens(inner, a) } else { inner })
            }
            Code::Paren(x) => Self::parens(self.code(x, a), a),
            Code::Call(f, args) => self
                .postfix(f, a)
                .append("(")
                .append(self.wrapped_list(args, a))
                .append(")"),
            Code::Index(x, i) => self
                .postfix(x, a)
                .append("[")
                .append(self.code(i, a))
                .append("]"),
            Code::Slice(x, lo, hi) => self
                .postfix(x, a)
                .append("[")
                .append(self.optional(lo, a))
                .append(":")
                .append(self.optional(hi, a))
                .append("]"),
            Code::TypeAssert(x, ty) => self
                .postfix(x, a)
                .append(".(")
                .append(self.code(ty, a))
                .append(")"),
            Code::Composite(ty, elts) => self
                .code(ty, a)
                .append("{")
                .append(self.wrapped_list(elts, a))
                .append("}"),
            Code::KeyedComposite(ty, pairs) => {
                let docs = pairs.iter().map(|(k, v)| {
                    self.code(k, a)
                        .append(": ")
                        .append(self.code(v, a))
                });
                self.code(ty, a)
                    .append("{")
                    .append(a.intersperse(docs, a.text(", ")))
                    .append("}")
            }
            Code::FuncLit(sig, body) => a
                .text("func")
                .append(self.signature(sig, a))
                .append(" ")
                .append(self.block(body, a)),
            Code::ChanOf(ty) => a.text("chan ").append(self.code(ty, a)),
            Code::SliceOf(ty) => a.text("[]").append(self.code(ty, a)),
            Code::PointerTo(ty) => a.text("*").append(self.code(ty, a)),
            Code::Commented(x, text) => self
                .code(x, a)
                .append(a.text(format!(" /*{}*/", inline_comment(text)))),
            Code::Annotated(text, x) => a
                .text(format!("/*{}*/", inline_comment(text)))
                .append(self.code(x, a)),
            Code::Comment(text) => Self::comment(text, a),
            Code::Assign(lhs, op, rhs) => self
                .comma_list(lhs, a)
                .append(a.text(format!(" {} ", op)))
                .append(self.comma_list(rhs, a)),
            Code::VarDecl { names, ty, values } => {
                let mut doc = a
                    .text("var ")
                    .append(a.text(names.join(", ")));
                if let Some(ty) = ty {
                    doc = doc.append(" ").append(self.code(ty, a));
                }
                if !values.is_empty() {
                    doc = doc.append(" = ").append(self.comma_list(values, a));
                }
                doc
            }
            Code::Return(values) => {
                if values.is_empty() {
                    a.text("return")
                } else {
                    a.text("return ").append(self.comma_list(values, a))
                }
            }
            Code::Break => a.text("break"),
            Code::Continue => a.text("continue"),
            Code::Go(x) => a.text("go ").append(self.code(x, a)),
            Code::Defer(x) => a.text("defer ").append(self.code(x, a)),
            Code::Send(ch, v) => self
                .code(ch, a)
                .append(" <- ")
                .append(self.code(v, a)),
            Code::Block(body) => self.block(body, a),
            Code::If {
                init,
                cond,
                then,
                otherwise,
            } => {
                let mut doc = a.text("if ");
                if let Some(init) = init {
                    doc = doc.append(self.code(init, a)).append("; ");
                }
                doc = doc
                    .append(self.code(cond, a))
                    .append(" ")
                    .append(self.block(then, a));
                match otherwise {
                    Some(Else::Block(body)) => doc.append(" else ").append(self.block(body, a)),
                    Some(Else::If(if_stmt)) => doc.append(" else ").append(self.code(if_stmt, a)),
                    None => doc,
                }
            }
            Code::For { header, body } => a
                .text("for ")
                .append(self.for_header(header, a))
                .append(self.block(body, a)),
            Code::Switch { tag, cases } => {
                let mut doc = a.text("switch ");
                if let Some(tag) = tag {
                    doc = doc.append(self.code(tag, a)).append(" ");
                }
                let arms = cases.iter().map(|case| {
                    let head = if case.exprs.is_empty() {
                        a.text("default:")
                    } else {
                        a.text("case ")
                            .append(self.comma_list(&case.exprs, a))
                            .append(":")
                    };
                    if case.body.is_empty() {
                        head
                    } else {
                        head.append(
                            a.hardline()
                                .append(self.statements(&case.body, a))
                                .nest(INDENT),
                        )
                    }
                });
                doc.append("{")
                    .append(a.hardline())
                    .append(a.intersperse(arms, a.hardline()))
                    .append(a.hardline())
                    .append("}")
            }
            Code::FuncDecl {
                recv,
                name,
                sig,
                body,
            } => {
                let mut doc = a.text("func ");
                if let Some(recv) = recv {
                    doc = doc
                        .append("(")
                        .append(self.param(recv, a))
                        .append(") ");
                }
                doc.append(name.as_str())
                    .append(self.signature(sig, a))
                    .append(" ")
                    .append(self.block(body, a))
            }
            Code::TypeStruct { name, fields } => {
                let field_docs = fields.iter().map(|f| match f {
                    Field::Comment(text) => Self::comment(text, a),
                    Field::Named { name, ty, comment } => {
                        let doc = a
                            .text(name.as_str())
                            .append(" ")
                            .append(self.code(ty, a));
                        match comment {
                            Some(c) => doc.append(a.text(format!(" // {}", c.replace('\n', " ")))),
                            None => doc,
                        }
                    }
                });
                let body = if fields.is_empty() {
                    a.nil()
                } else {
                    a.hardline()
                        .append(a.intersperse(field_docs, a.hardline()))
                        .nest(INDENT)
                };
                a.text("type ")
                    .append(name.as_str())
                    .append(" struct {")
                    .append(body)
                    .append(a.hardline())
                    .append("}")
            }
            Code::Trailing(stmt, text) => self
                .code(stmt, a)
                .append(a.text(format!(" // {}", text.replace('\n', " ")))),
        }
    }

    fn lit<D, A>(&self, lit: &'b Lit, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match lit {
            Lit::Int(i) => a.text(i.to_string()),
            Lit::BigInt(digits) => a.text(digits.as_str()),
            Lit::Float(f) => a.text(float_text(*f)),
            Lit::Str(s) => a.text(quote(s)),
            Lit::Bytes(b) => a.text(quote_bytes(b)),
            Lit::Bool(b) => a.text(if *b { "true" } else { "false" }),
            Lit::Nil => a.text("nil"),
        }
    }

    fn parens<D, A>(inner: DocBuilder<'b, D, A>, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        a.text("(").append(inner).append(")")
    }

    /// Operand of a binary operator, parenthesised when it binds
    /// more loosely (or, on the right, equally)
    fn operand<D, A>(&self, x: &'b Code, prec: u8, right: bool, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let wrap = match x {
            Code::Binary(_, op, _) => {
                let p = precedence(op);
                p < prec || (right && p == prec)
            }
            _ => false,
        };
        let doc = self.code(x, a);
        if wrap {
            Self::parens(doc, a)
        } else {
            doc
        }
    }

    /// Operand of a selector, call, index or assertion
    fn postfix<D, A>(&self, x: &'b Code, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let doc = self.code(x, a);
        match x {
            Code::Binary(..) | Code::Unary(..) | Code::Commented(..) => Self::parens(doc, a),
            _ => doc,
        }
    }

    fn optional<D, A>(&self, x: &'b Option<Box<Code>>, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match x {
            Some(x) => self.code(x, a),
            None => a.nil(),
        }
    }

    fn comma_list<D, A>(&self, items: &'b [Code], a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        a.intersperse(items.iter().map(|i| self.code(i, a)), a.text(", "))
    }

    /// Arguments or elements, breaking after commas when the line
    /// would overflow; a list holding a block stays on one line
    fn wrapped_list<D, A>(&self, items: &'b [Code], a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        if items.len() < 2 || items.iter().any(spans_lines) {
            return self.comma_list(items, a);
        }
        a.intersperse(items.iter().map(|i| self.code(i, a)), a.text(",").append(a.line()))
            .nest(INDENT)
            .group()
    }

    fn comment<D, A>(text: &'b str, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let lines = text.split('\n').map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                a.text("//")
            } else {
                a.text(format!("// {}", line))
            }
        });
        a.intersperse(lines, a.hardline())
    }

    /// Statement sequence, one per line
    fn statements<D, A>(&self, body: &'b [Code], a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        a.intersperse(
            body.iter().map(|c| self.code(c, a)),
            a.hardline(),
        )
    }

    fn block<D, A>(&self, body: &'b [Code], a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let inner = if body.is_empty() {
            a.nil()
        } else {
            a.hardline()
                .append(self.statements(body, a))
                .nest(INDENT)
        };
        a.text("{").append(inner).append(a.hardline()).append("}")
    }

    fn param<D, A>(&self, p: &'b Param, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        a.text(p.name.as_str()).append(" ").append(self.code(&p.ty, a))
    }

    fn signature<D, A>(&self, sig: &'b Signature, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let params = a.intersperse(sig.params.iter().map(|p| self.param(p, a)), a.text(", "));
        let doc = a.text("(").append(params).append(")");
        match sig.results.len() {
            0 => doc,
            1 => doc.append(" ").append(self.code(&sig.results[0], a)),
            _ => doc
                .append(" (")
                .append(self.comma_list(&sig.results, a))
                .append(")"),
        }
    }

    fn for_header<D, A>(&self, header: &'b ForHeader, a: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        match header {
            ForHeader::Forever => a.nil(),
            ForHeader::Cond(cond) => self.code(cond, a).append(" "),
            ForHeader::Clause { init, cond, post } => self
                .optional(init, a)
                .append("; ")
                .append(self.optional(cond, a))
                .append("; ")
                .append(self.optional(post, a))
                .append(" "),
            ForHeader::Range { vars, define, expr } => {
                let head = if vars.is_empty() {
                    a.nil()
                } else {
                    self.comma_list(vars, a)
                        .append(if *define { " := " } else { " = " })
                };
                head.append("range ").append(self.code(expr, a)).append(" ")
            }
        }
    }
}

/// Expressions whose layout contains a forced line break
fn spans_lines(code: &Code) -> bool {
    match code {
        Code::FuncLit(..) => true,
        Code::Call(f, args) => spans_lines(f) || args.iter().any(spans_lines),
        Code::Composite(ty, elts) => spans_lines(ty) || elts.iter().any(spans_lines),
        Code::KeyedComposite(ty, pairs) => {
            spans_lines(ty) || pairs.iter().any(|(k, v)| spans_lines(k) || spans_lines(v))
        }
        Code::Binary(l, _, r) => spans_lines(l) || spans_lines(r),
        Code::Unary(_, x)
        | Code::Paren(x)
        | Code::Dot(x, _)
        | Code::TypeAssert(x, _)
        | Code::Commented(x, _)
        | Code::Annotated(_, x) => spans_lines(x),
        Code::Index(x, i) => spans_lines(x) || spans_lines(i),
        _ => false,
    }
}

#[cfg(test)]
pub mod tests {
    use crate::common::prettify::prettify_width;
    use crate::target::code::Code;
    use crate::target::go::*;
    use crate::target::imports::ImportRegistry;
    use crate::target::pretty::Printed;

    fn at_width(code: &Code, width: usize) -> String {
        prettify_width(&Printed::new(code, &ImportRegistry::default()), width)
    }

    #[test]
    pub fn test_long_argument_lists_break_after_commas() {
        let code = call(
            qual("fmt", "Println"),
            vec![string("alpha"), string("beta"), string("gamma")],
        );
        assert_eq!(at_width(&code, 80), "fmt.Println(\"alpha\", \"beta\", \"gamma\")");
        assert_eq!(
            at_width(&code, 20),
            "fmt.Println(\"alpha\",\n    \"beta\",\n    \"gamma\")"
        );
    }

    #[test]
    pub fn test_lists_holding_blocks_stay_flat() {
        let code = call(
            id("apply"),
            vec![func_lit(signature(vec![], vec![]), vec![]), id("x")],
        );
        assert_eq!(at_width(&code, 10), "apply(func() {\n}, x)");
    }

    #[test]
    pub fn test_precedence_parens() {
        let sum = binary(id("a"), "+", id("b"));
        assert_eq!(format!("{}", binary(sum.clone(), "*", id("c"))), "(a + b) * c");
        assert_eq!(format!("{}", binary(id("c"), "-", sum.clone())), "c - (a + b)");
        assert_eq!(format!("{}", binary(sum.clone(), "-", id("c"))), "a + b - c");
        assert_eq!(format!("{}", unary("-", sum.clone())), "-(a + b)");
        assert_eq!(format!("{}", unary("-", int(-1))), "-(-1)");
        assert_eq!(format!("{}", dot(sum, "x")), "(a + b).x");
    }

    #[test]
    pub fn test_strings() {
        assert_eq!(format!("{}", string("a\"b\\\n\u{1}")), r#""a\"b\\\n\x01""#);
        assert_eq!(format!("{}", bytes(b"\xffA")), r#"[]byte("\xffA")"#);
    }

    #[test]
    pub fn test_blocks_and_comments() {
        let code = if_(
            id("ok"),
            vec![comment("two\nlines"), ret(vec![])],
            Some(else_block(vec![])),
        );
        assert_eq!(
            format!("{}", code),
            "if ok {\n    // two\n    // lines\n    return\n} else {\n}"
        );
    }

    #[test]
    pub fn test_switch() {
        let code = switch(
            Some(id("err")),
            vec![
                case(vec![id("A"), id("B")], vec![break_()]),
                default(vec![]),
            ],
        );
        assert_eq!(
            format!("{}", code),
            "switch err {\ncase A, B:\n    break\ndefault:\n}"
        );
    }

    #[test]
    pub fn test_counted_loop() {
        let code = for_clause(
            Some(define(vec![id("i")], vec![int(0)])),
            Some(binary(id("i"), "<", int(5))),
            Some(op_assign(id("i"), "+=", int(1))),
            vec![call(qual("fmt", "Println"), vec![id("i")])],
        );
        assert_eq!(
            format!("{}", code),
            "for i := 0; i < 5; i += 1 {\n    fmt.Println(i)\n}"
        );
    }

    #[test]
    pub fn test_func_and_struct() {
        let method = func_decl(
            Some(param("self", pointer_to(id("Point")))),
            "String",
            signature(vec![], vec![id("string")]),
            vec![ret(vec![string("p")])],
        );
        assert_eq!(
            format!("{}", method),
            "func (self *Point) String() string {\n    return \"p\"\n}"
        );
        let decl = struct_decl(
            "Point",
            vec![
                field_comment("a point"),
                field("x", qual("pygo/runtime", "Any"), Some("= 0".to_string())),
            ],
        );
        assert_eq!(
            format!("{}", decl),
            "type Point struct {\n    // a point\n    x runtime.Any // = 0\n}"
        );
    }

    #[test]
    pub fn test_iife_and_annotations() {
        let code = iife(vec![id("int")], vec![ret(vec![int(1)])]);
        assert_eq!(format!("{}", code), "func() int {\n    return 1\n}()");
        assert_eq!(
            format!("{}", call(id("f"), vec![annotated("k=", int(1)), commented(id("xs"), "...")])),
            "f(/*k=*/1, xs /*...*/)"
        );
    }
}

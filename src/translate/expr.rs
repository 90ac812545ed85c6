//! Expression translation.
use crate::syntax::ast::*;
use crate::target::code::Code;
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::tables;
use crate::translate::translator::Translator;
use tracing::trace;

/// Free of side effects, so safe to evaluate more than once
pub fn is_pure(e: &Expr) -> bool {
    match &e.kind {
        ExprKind::Name { .. }
        | ExprKind::Int { .. }
        | ExprKind::BigInt { .. }
        | ExprKind::Float { .. }
        | ExprKind::Complex { .. }
        | ExprKind::Str { .. }
        | ExprKind::Bytes { .. }
        | ExprKind::NameConstant { .. } => true,
        ExprKind::Attribute { value, .. } => is_pure(value),
        ExprKind::UnaryOp { operand, .. } => is_pure(operand),
        _ => false,
    }
}

/// Name of an exported member of a target package
pub fn exported(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'s> Translator<'s> {
    pub fn expr(&mut self, e: &Expr) -> Result<Code, TranslateError> {
        trace!(kind = e.kind.kind_name(), "expression");

        match &e.kind {
            ExprKind::Int { value } => Ok(go::int(*value)),
            ExprKind::BigInt { digits } => Ok(go::big_int(digits)),
            ExprKind::Float { value } => Ok(go::float(*value)),
            ExprKind::Complex { real, imag } => Ok(go::complex(*real, *imag)),
            ExprKind::Str { value } => Ok(go::string(value)),
            ExprKind::Bytes { value } => Ok(go::bytes(value)),
            ExprKind::NameConstant { value } => Ok(match value {
                Singleton::True => go::bool(true),
                Singleton::False => go::bool(false),
                Singleton::None => go::nil(),
            }),
            ExprKind::Name { id } => Ok(self.name_ref(id)),
            ExprKind::List { elts } => self.container("List", elts),
            ExprKind::Tuple { elts } => self.container("Tuple", elts),
            ExprKind::Dict { keys, values } => self.dict(e, keys, values),
            ExprKind::ListComp { elt, generators } => self.list_comp(elt, generators),
            ExprKind::DictComp {
                key,
                value,
                generators,
            } => self.dict_comp(key, value, generators),
            ExprKind::GeneratorExp { elt, generators } => self.generator_exp(elt, generators),
            ExprKind::BinOp { left, op, right } => self.binop(e, left, *op, right),
            ExprKind::UnaryOp { op, operand } => self.unaryop(*op, operand),
            ExprKind::BoolOp { op, values } => self.boolop(*op, values),
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => self.compare(left, ops, comparators),
            ExprKind::Attribute { value, attr } => self.attribute(value, attr),
            ExprKind::Subscript { value, slice } => self.subscript(e, value, slice),
            ExprKind::Call {
                func,
                args,
                keywords,
            } => self.call(func, args, keywords),
            ExprKind::Lambda { args, body } => self.lambda(args, body),
            ExprKind::IfExp { test, body, orelse } => self.if_exp(test, body, orelse),
            ExprKind::JoinedStr { values } => self.joined_str(values),
            ExprKind::FormattedValue {
                value,
                conversion,
                format_spec,
            } => self.formatted_value(value, *conversion, format_spec.as_deref()),
            ExprKind::Ellipsis
            | ExprKind::NamedExpr { .. }
            | ExprKind::Set { .. }
            | ExprKind::SetComp { .. }
            | ExprKind::Slice { .. }
            | ExprKind::Starred { .. }
            | ExprKind::Await { .. }
            | ExprKind::Yield { .. }
            | ExprKind::YieldFrom { .. } => self.unknown_expr("EXPR", e),
        }
    }

    pub fn expr_list(&mut self, exprs: &[Expr]) -> Result<Vec<Code>, TranslateError> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    pub fn opt_expr(&mut self, e: Option<&Expr>) -> Result<Option<Code>, TranslateError> {
        e.map(|e| self.expr(e)).transpose()
    }

    /// `(runtime.List{...})` and friends
    fn container(&mut self, ty: &str, elts: &[Expr]) -> Result<Code, TranslateError> {
        let elts = self.expr_list(elts)?;
        Ok(go::paren(go::composite(self.runtime(ty), elts)))
    }

    fn dict(&mut self, e: &Expr, keys: &[Option<Expr>], values: &[Expr]) -> Result<Code, TranslateError> {
        let mut pairs = vec![];
        for (k, v) in keys.iter().zip(values) {
            match k {
                Some(k) => pairs.push((self.expr(k)?, self.expr(v)?)),
                // `**mapping` unpacking
                None => return self.unknown_expr("DICT", e),
            }
        }
        Ok(go::paren(go::keyed(self.runtime("Dict"), pairs)))
    }

    fn binop(&mut self, e: &Expr, left: &Expr, op: BinOp, right: &Expr) -> Result<Code, TranslateError> {
        if op == BinOp::Mod && left.is_str() {
            let mut args = vec![self.expr(left)?];
            match &right.kind {
                ExprKind::Tuple { elts } => args.extend(self.expr_list(elts)?),
                _ => args.push(self.expr(right)?),
            }
            return Ok(go::call(go::qual("fmt", "Sprintf"), args));
        }

        match tables::binary_op(op) {
            Some(token) => {
                let l = self.expr(left)?;
                let r = self.expr(right)?;
                Ok(go::binary(l, token, r))
            }
            None => match op {
                BinOp::Pow => {
                    let l = self.expr(left)?;
                    let r = self.expr(right)?;
                    Ok(go::call(go::qual("math", "Pow"), vec![l, r]))
                }
                BinOp::FloorDiv => {
                    let l = self.expr(left)?;
                    let r = self.expr(right)?;
                    Ok(go::call(self.runtime("FloorDiv"), vec![l, r]))
                }
                _ => self.unknown_expr("BINOP", e),
            },
        }
    }

    fn unaryop(&mut self, op: UnaryOp, operand: &Expr) -> Result<Code, TranslateError> {
        let x = self.expr(operand)?;
        match tables::unary_op(op) {
            Some(token) => Ok(go::unary(token, x)),
            // ~x == -(x + 1)
            None => Ok(go::unary("-", go::binary(x, "+", go::int(1)))),
        }
    }

    fn boolop(&mut self, op: BoolOp, values: &[Expr]) -> Result<Code, TranslateError> {
        let token = tables::bool_op(op);
        let mut terms = self.expr_list(values)?.into_iter();
        let first = match terms.next() {
            Some(first) => first,
            None => return Ok(go::bool(op == BoolOp::And)),
        };
        Ok(terms.fold(first, |acc, t| go::binary(acc, token, t)))
    }

    /// A single pairwise comparison
    fn comparison(&self, op: CmpOp, left: Code, right: Code) -> Code {
        match op {
            CmpOp::In => go::call(self.runtime("Contains"), vec![right, left]),
            CmpOp::NotIn => go::not(go::call(self.runtime("Contains"), vec![right, left])),
            _ => match tables::cmp_op(op) {
                Some(token) => go::binary(left, token, right),
                None => go::bool(false),
            },
        }
    }

    /// Comparison chains become a conjunction of pairwise comparisons
    /// in which every comparator is evaluated once.
    ///
    /// When the reused comparators are side-effect free their
    /// fragments are repeated in a flat conjunction; otherwise each
    /// operand is bound to a temporary in a closure that stops at the
    /// first failing pair.
    fn compare(&mut self, left: &Expr, ops: &[CmpOp], comparators: &[Expr]) -> Result<Code, TranslateError> {
        let reused = &comparators[..comparators.len().saturating_sub(1)];
        if reused.iter().all(is_pure) {
            let mut prev = self.expr(left)?;
            let mut terms = vec![];
            for (op, comparator) in ops.iter().zip(comparators) {
                let next = self.expr(comparator)?;
                terms.push(self.comparison(*op, prev, next.clone()));
                prev = next;
            }
            return Ok(go::and_all(terms));
        }

        let mut body = vec![];
        let first = self.expr(left)?;
        let mut prev = self.fresh("cmp");
        body.push(go::define(vec![go::id(&prev)], vec![first]));
        for (i, (op, comparator)) in ops.iter().zip(comparators).enumerate() {
            let value = self.expr(comparator)?;
            let name = self.fresh("cmp");
            body.push(go::define(vec![go::id(&name)], vec![value]));
            let test = self.comparison(*op, go::id(&prev), go::id(&name));
            if i + 1 == ops.len() {
                body.push(go::ret(vec![test]));
            } else {
                body.push(go::if_(go::not(test), vec![go::ret(vec![go::bool(false)])], None));
            }
            prev = name;
        }
        Ok(go::iife(vec![go::id("bool")], body))
    }

    fn attribute(&mut self, value: &Expr, attr: &str) -> Result<Code, TranslateError> {
        if let Some(path) = value.as_name().and_then(|n| self.scopes.import_path(n)) {
            if path == "sys" {
                match attr {
                    "stdin" => return Ok(go::qual("os", "Stdin")),
                    "stdout" => return Ok(go::qual("os", "Stdout")),
                    "stderr" => return Ok(go::qual("os", "Stderr")),
                    _ => {}
                }
            }
            return Ok(go::qual(path, exported(attr)));
        }
        let base = self.expr(value)?;
        Ok(go::dot(base, tables::ident(attr)))
    }

    fn subscript(&mut self, e: &Expr, value: &Expr, slice: &Expr) -> Result<Code, TranslateError> {
        match &slice.kind {
            ExprKind::Slice { lower, upper, step } => {
                if step.is_some() {
                    return Err(TranslateError::SteppedSlice(e.pos));
                }
                let base = self.expr(value)?;
                let lo = self.opt_expr(lower.as_deref())?;
                let hi = self.opt_expr(upper.as_deref())?;
                Ok(go::slice(base, lo, hi))
            }
            ExprKind::Tuple { elts }
                if elts.iter().any(|x| matches!(x.kind, ExprKind::Slice { .. })) =>
            {
                Err(TranslateError::ExtendedSlice(e.pos))
            }
            _ => {
                let base = self.expr(value)?;
                let index = self.expr(slice)?;
                Ok(go::index(base, index))
            }
        }
    }

    /// A function literal returning the body's value
    fn lambda(&mut self, args: &Arguments, body: &Expr) -> Result<Code, TranslateError> {
        self.scoped(|t| {
            let (params, _) = t.parameters(args, false)?;
            let value = t.expr(body)?;
            Ok(go::func_lit(
                go::signature(params, vec![t.runtime("Any")]),
                vec![go::ret(vec![value])],
            ))
        })
    }

    /// Immediately invoked closure returning one branch
    fn if_exp(&mut self, test: &Expr, body: &Expr, orelse: &Expr) -> Result<Code, TranslateError> {
        let cond = self.expr(test)?;
        let then = self.expr(body)?;
        let otherwise = self.expr(orelse)?;
        Ok(go::iife(
            vec![self.runtime("Any")],
            vec![go::if_(
                cond,
                vec![go::ret(vec![then])],
                Some(go::else_block(vec![go::ret(vec![otherwise])])),
            )],
        ))
    }

    /// f-strings concatenate their parts with `fmt.Sprint`
    fn joined_str(&mut self, values: &[Expr]) -> Result<Code, TranslateError> {
        let mut parts = vec![];
        for v in values {
            parts.push(match &v.kind {
                ExprKind::FormattedValue {
                    value,
                    conversion,
                    format_spec,
                } => self.formatted_value(value, *conversion, format_spec.as_deref())?,
                _ => self.expr(v)?,
            });
        }
        Ok(go::call(go::qual("fmt", "Sprint"), parts))
    }

    /// A replacement field; conversions and format specs are kept as
    /// comments
    fn formatted_value(
        &mut self,
        value: &Expr,
        conversion: i32,
        format_spec: Option<&Expr>,
    ) -> Result<Code, TranslateError> {
        let mut code = self.expr(value)?;
        if let Some(c) = std::char::from_u32(conversion as u32).filter(|_| conversion > 0) {
            code = go::commented(code, format!("!{}", c));
        }
        if let Some(spec) = format_spec {
            code = go::commented(code, format!(":{}", literal_text(spec)));
        }
        Ok(code)
    }
}

/// Literal text of a format spec
fn literal_text(spec: &Expr) -> String {
    match &spec.kind {
        ExprKind::Str { value } => value.clone(),
        ExprKind::JoinedStr { values } => values.iter().map(literal_text).collect(),
        _ => "{...}".to_string(),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::make::*;
    use crate::translate::TranslateSettings;

    fn render(e: Expr) -> String {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        t.expr(&e).unwrap().to_string()
    }

    fn translate_err(e: Expr) -> TranslateError {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        t.expr(&e).unwrap_err()
    }

    #[test]
    pub fn test_literals() {
        assert_eq!(render(int(42)), "42");
        assert_eq!(render(float(2.5)), "2.5");
        assert_eq!(render(str("hi")), "\"hi\"");
        assert_eq!(render(true_()), "true");
        assert_eq!(render(none()), "nil");
        assert_eq!(
            render(Expr::new(ExprKind::Complex { real: 0.0, imag: 1.0 })),
            "complex(0.0, 1.0)"
        );
    }

    #[test]
    pub fn test_containers() {
        assert_eq!(render(list(vec![int(1), int(2)])), "(runtime.List{1, 2})");
        assert_eq!(render(tuple(vec![str("a")])), "(runtime.Tuple{\"a\"})");
        assert_eq!(
            render(dict(vec![(str("a"), int(1))])),
            "(runtime.Dict{\"a\": 1})"
        );
    }

    #[test]
    pub fn test_format_operator() {
        let e = binop(str("%s=%d"), BinOp::Mod, tuple(vec![name("k"), name("v")]));
        assert_eq!(render(e), "fmt.Sprintf(\"%s=%d\", k, v)");
        let e = binop(str("%s"), BinOp::Mod, name("k"));
        assert_eq!(render(e), "fmt.Sprintf(\"%s\", k)");
        assert_eq!(render(binop(name("a"), BinOp::Mod, name("b"))), "a % b");
    }

    #[test]
    pub fn test_operators_without_tokens() {
        assert_eq!(render(binop(name("a"), BinOp::Pow, int(2))), "math.Pow(a, 2)");
        assert_eq!(
            render(binop(name("a"), BinOp::FloorDiv, int(2))),
            "runtime.FloorDiv(a, 2)"
        );
        assert!(render(binop(name("a"), BinOp::MatMult, name("b"))).contains("UNKNOWN-BINOP"));
    }

    #[test]
    pub fn test_unary() {
        assert_eq!(render(unary(UnaryOp::Invert, name("x"))), "-(x + 1)");
        assert_eq!(render(unary(UnaryOp::Not, name("x"))), "!x");
        assert_eq!(render(unary(UnaryOp::USub, name("x"))), "-x");
    }

    #[test]
    pub fn test_bool_ops() {
        let e = boolop(
            BoolOp::Or,
            vec![boolop(BoolOp::And, vec![name("a"), name("b")]), name("c")],
        );
        assert_eq!(render(e), "a && b || c");
        let e = boolop(
            BoolOp::And,
            vec![name("a"), boolop(BoolOp::Or, vec![name("b"), name("c")])],
        );
        assert_eq!(render(e), "a && (b || c)");
    }

    #[test]
    pub fn test_membership() {
        assert_eq!(
            render(compare(name("x"), CmpOp::In, name("xs"))),
            "runtime.Contains(xs, x)"
        );
        assert_eq!(
            render(compare(name("x"), CmpOp::NotIn, name("xs"))),
            "!runtime.Contains(xs, x)"
        );
        assert_eq!(render(compare(name("x"), CmpOp::IsNot, none())), "x != nil");
    }

    #[test]
    pub fn test_pure_comparison_chain() {
        let e = compare_chain(name("a"), vec![(CmpOp::Lt, name("b")), (CmpOp::LtE, int(3))]);
        assert_eq!(render(e), "a < b && b <= 3");
    }

    #[test]
    pub fn test_comparison_chain_evaluates_once() {
        let e = compare_chain(
            call(name("a"), vec![]),
            vec![
                (CmpOp::Lt, call(name("b"), vec![])),
                (CmpOp::Lt, call(name("c"), vec![])),
            ],
        );
        let text = render(e);
        assert_eq!(text.matches("b()").count(), 1);
        assert_eq!(
            text,
            "func() bool {\n    cmpΠ0 := a()\n    cmpΠ1 := b()\n    if !(cmpΠ0 < cmpΠ1) {\n        \
             return false\n    }\n    cmpΠ2 := c()\n    return cmpΠ1 < cmpΠ2\n}()"
        );
    }

    #[test]
    pub fn test_slices() {
        let e = subscript(name("a"), slice(Some(int(1)), None, None));
        assert_eq!(render(e), "a[1:]");
        let e = subscript(name("a"), slice(None, Some(name("n")), None));
        assert_eq!(render(e), "a[:n]");
        assert_eq!(render(subscript(name("d"), str("k"))), "d[\"k\"]");
    }

    #[test]
    pub fn test_stepped_slice_is_fatal_in_both_modes() {
        let e = subscript(name("a"), slice(None, None, Some(int(2)))).at(5, 1);
        assert_eq!(translate_err(e.clone()), TranslateError::SteppedSlice(e.pos));

        let settings = TranslateSettings::strict();
        let mut t = Translator::new(&settings);
        assert!(matches!(t.expr(&e), Err(TranslateError::SteppedSlice(_))));
    }

    #[test]
    pub fn test_extended_slice_is_fatal() {
        let e = subscript(
            name("a"),
            tuple(vec![slice(None, None, None), int(0)]),
        );
        assert!(matches!(translate_err(e), TranslateError::ExtendedSlice(_)));
    }

    #[test]
    pub fn test_attributes() {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        t.scopes.bind_import("os", "os");
        t.scopes.bind_import("sys", "sys");
        assert_eq!(t.expr(&attr(name("os"), "getcwd")).unwrap().to_string(), "os.Getcwd");
        assert_eq!(t.expr(&attr(name("sys"), "stderr")).unwrap().to_string(), "os.Stderr");
        assert_eq!(t.expr(&attr(name("p"), "type")).unwrap().to_string(), "p.typeΠ");
    }

    #[test]
    pub fn test_lambda() {
        let e = lambda(&["x"], binop(name("x"), BinOp::Add, int(1)));
        assert_eq!(
            render(e),
            "func(x runtime.Any) runtime.Any {\n    return x + 1\n}"
        );
    }

    #[test]
    pub fn test_conditional_expression() {
        let e = if_exp(name("c"), name("a"), name("b"));
        assert_eq!(
            render(e),
            "func() runtime.Any {\n    if c {\n        return a\n    } else {\n        \
             return b\n    }\n}()"
        );
    }

    #[test]
    pub fn test_f_string() {
        let e = Expr::new(ExprKind::JoinedStr {
            values: vec![
                str("x="),
                Expr::new(ExprKind::FormattedValue {
                    value: Box::new(name("x")),
                    conversion: -1,
                    format_spec: Some(Box::new(str(".2f"))),
                }),
            ],
        });
        assert_eq!(render(e), "fmt.Sprint(\"x=\", x /*:.2f*/)");
    }

    #[test]
    pub fn test_unknown_expression_kinds() {
        let text = render(Expr::new(ExprKind::Set { elts: vec![] }).at(1, 4));
        assert!(text.starts_with("\"UNKNOWN-EXPR: ast.Set"));
        assert!(text.ends_with("at line 1, col 4\""));
    }
}

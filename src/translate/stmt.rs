//! Statement translation and routine definitions.
use crate::syntax::ast::*;
use crate::target::code::{Code, Param};
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::expr::{exported, is_pure};
use crate::translate::tables;
use crate::translate::translator::{Context, Routine, Translator};
use crate::translate::GeneratorPolicy;
use itertools::Itertools;
use tracing::debug;

/// Receiver name when a method declares no parameters
const DEFAULT_RECEIVER: &str = "self";

impl<'s> Translator<'s> {
    /// Translate one statement into zero or more fragments
    pub fn statement(&mut self, stmt: &Stmt, ctx: Context) -> Result<Vec<Code>, TranslateError> {
        debug!(kind = stmt.kind.kind_name(), line = stmt.pos.line, "statement");

        match &stmt.kind {
            StmtKind::Expr { value } => self.expr_stmt(stmt, value),
            StmtKind::Assign { targets, value } => self.assign_stmt(targets, value),
            StmtKind::AugAssign { target, op, value } => self.aug_assign_stmt(stmt, target, *op, value),
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                ..
            } => self.ann_assign_stmt(target, annotation, value.as_deref()),
            StmtKind::Return { value } => self.return_stmt(value.as_deref()),
            StmtKind::Delete { targets } => self.delete_stmt(targets),
            StmtKind::Pass => Ok(vec![go::comment("pass")]),
            StmtKind::Break => Ok(self.break_stmt(ctx)),
            StmtKind::Continue => Ok(vec![go::continue_()]),
            StmtKind::Raise { exc, cause } => self.raise_stmt(stmt, exc.as_deref(), cause.as_deref(), ctx),
            StmtKind::Assert { test, msg } => self.assert_stmt(test, msg.as_deref()),
            StmtKind::Global { names } => Ok(vec![go::comment(format!("global {}", names.join(", ")))]),
            StmtKind::Nonlocal { names } => Ok(vec![go::comment(format!("nonlocal {}", names.join(", ")))]),
            StmtKind::Import { names } => Ok(self.import_stmt(names)),
            StmtKind::ImportFrom { module, names, level } => {
                Ok(self.import_from_stmt(module.as_deref(), names, *level))
            }
            StmtKind::If { test, body, orelse } => Ok(vec![self.if_stmt(test, body, orelse, ctx)?]),
            StmtKind::For {
                target,
                iter,
                body,
                orelse,
            } => self.for_stmt(target, iter, body, orelse, ctx),
            StmtKind::While { test, body, orelse } => self.while_stmt(test, body, orelse, ctx),
            StmtKind::With { items, body } => Ok(vec![self.with_stmt(items, body, ctx)?]),
            StmtKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
            } => self.try_stmt(body, handlers, orelse, finalbody, ctx),
            StmtKind::FunctionDef {
                name,
                args,
                body,
                decorator_list,
                returns,
            } => self.function_def(name, args, body, decorator_list, returns.as_deref(), false, ctx),
            StmtKind::AsyncFunctionDef {
                name,
                args,
                body,
                decorator_list,
                returns,
            } => self.function_def(name, args, body, decorator_list, returns.as_deref(), true, ctx),
            StmtKind::ClassDef {
                name,
                bases,
                keywords,
                body,
                decorator_list,
            } => self.class_def(name, bases, keywords, body, decorator_list),
            StmtKind::AsyncFor { .. }
            | StmtKind::AsyncWith { .. }
            | StmtKind::TryStar { .. }
            | StmtKind::Match { .. }
            | StmtKind::TypeAlias { .. } => Ok(vec![self.unknown_stmt("STMT", stmt)?]),
        }
    }

    fn expr_stmt(&mut self, stmt: &Stmt, value: &Expr) -> Result<Vec<Code>, TranslateError> {
        match &value.kind {
            // docstring
            ExprKind::Str { value } => Ok(vec![go::comment(value.trim())]),
            ExprKind::Yield { value } => self.yield_stmt(stmt, value.as_deref(), "yield"),
            ExprKind::YieldFrom { value } => self.yield_stmt(stmt, Some(value), "yield from"),
            _ => Ok(vec![self.expr(value)?]),
        }
    }

    /// A suspension point degrades to returning the value once
    fn yield_stmt(&mut self, stmt: &Stmt, value: Option<&Expr>, label: &str) -> Result<Vec<Code>, TranslateError> {
        if self.settings.generator_policy == GeneratorPolicy::Reject {
            return Err(TranslateError::GeneratorRejected(stmt.pos));
        }
        self.mark_routine(|r| r.generator = true);
        let values = match value {
            Some(v) => vec![self.expr(v)?],
            None => vec![],
        };
        Ok(vec![go::trailing(go::ret(values), label)])
    }

    /// Declaration when any target name is new to the scope chain,
    /// plain assignment otherwise
    fn assign_stmt(&mut self, targets: &[Expr], value: &Expr) -> Result<Vec<Code>, TranslateError> {
        if let [target] = targets {
            return self.assign_one(target, value);
        }

        // t1 = t2 = value: evaluate once, assign to each target in turn
        let mut out = vec![];
        let shared = if is_pure(value) {
            value.clone()
        } else {
            let tmp = self.fresh("tmp");
            let code = self.expr(value)?;
            out.push(go::var_decl(vec![tmp.clone()], None, vec![code]));
            self.scopes.declare(&tmp);
            Expr::new(ExprKind::Name { id: tmp })
        };
        for target in targets {
            out.extend(self.assign_one(target, &shared)?);
        }
        Ok(out)
    }

    fn assign_one(&mut self, target: &Expr, value: &Expr) -> Result<Vec<Code>, TranslateError> {
        match &target.kind {
            ExprKind::Name { id } => {
                let rhs = self.expr(value)?;
                let lhs = tables::ident(id);
                if self.scopes.classify_assignment_targets(vec![id.as_str()]) {
                    Ok(vec![go::var_decl(vec![lhs], None, vec![rhs])])
                } else {
                    Ok(vec![go::assign(vec![go::id(lhs)], vec![rhs])])
                }
            }
            ExprKind::Tuple { elts } | ExprKind::List { elts } => {
                let rhs = match &value.kind {
                    ExprKind::Tuple { elts: values } | ExprKind::List { elts: values }
                        if values.len() == elts.len() =>
                    {
                        self.expr_list(values)?
                    }
                    _ => vec![self.expr(value)?],
                };
                let lhs = self.expr_targets(elts)?;
                if elts.iter().all(|e| e.as_name().is_some()) {
                    if self.scopes.classify_assignment_targets(elts.iter().filter_map(Expr::as_name)) {
                        return Ok(vec![go::define(lhs, rhs)]);
                    }
                    return Ok(vec![go::assign(lhs, rhs)]);
                }

                // `:=` cannot mix with fields or elements, so new names
                // are declared ahead of the parallel assignment
                let mut fresh = vec![];
                for name in elts.iter().filter_map(Expr::as_name) {
                    if self.scopes.classify_assignment_targets(vec![name]) {
                        fresh.push(tables::ident(name));
                    }
                }
                let mut out = vec![];
                if !fresh.is_empty() {
                    out.push(go::var_decl(fresh, Some(self.runtime("Any")), vec![]));
                }
                out.push(go::assign(lhs, rhs));
                Ok(out)
            }
            _ => {
                let rhs = self.expr(value)?;
                let lhs = self.expr(target)?;
                Ok(vec![go::assign(vec![lhs], vec![rhs])])
            }
        }
    }

    /// Assignment targets; names are written, not resolved
    fn expr_targets(&mut self, targets: &[Expr]) -> Result<Vec<Code>, TranslateError> {
        targets.iter().map(|t| self.target(t)).collect()
    }

    fn target(&mut self, target: &Expr) -> Result<Code, TranslateError> {
        match target.as_name() {
            Some(name) => Ok(go::id(tables::ident(name))),
            None => self.expr(target),
        }
    }

    fn aug_assign_stmt(
        &mut self,
        stmt: &Stmt,
        target: &Expr,
        op: BinOp,
        value: &Expr,
    ) -> Result<Vec<Code>, TranslateError> {
        let lhs = self.target(target)?;
        let rhs = self.expr(value)?;
        let code = match (tables::aug_op(op), op) {
            (Some(token), _) => go::op_assign(lhs, token, rhs),
            (None, BinOp::Pow) => go::assign(
                vec![lhs.clone()],
                vec![go::call(go::qual("math", "Pow"), vec![lhs, rhs])],
            ),
            (None, BinOp::FloorDiv) => go::assign(
                vec![lhs.clone()],
                vec![go::call(self.runtime("FloorDiv"), vec![lhs, rhs])],
            ),
            (None, _) => self.unknown_stmt("AUGASSIGN", stmt)?,
        };
        Ok(vec![code])
    }

    /// `x: T = v` declares a typed variable
    fn ann_assign_stmt(
        &mut self,
        target: &Expr,
        annotation: &Expr,
        value: Option<&Expr>,
    ) -> Result<Vec<Code>, TranslateError> {
        let value = self.opt_expr(value)?;
        match (target.as_name(), value) {
            (Some(name), value) if !self.scopes.is_known(name) => {
                let ty = self.expr(annotation)?;
                self.scopes.declare(name);
                Ok(vec![go::var_decl(
                    vec![tables::ident(name)],
                    Some(ty),
                    value.into_iter().collect(),
                )])
            }
            (_, Some(value)) => {
                let lhs = self.target(target)?;
                Ok(vec![go::assign(vec![lhs], vec![value])])
            }
            (_, None) => {
                let lhs = self.target(target)?;
                let ty = self.expr(annotation)?;
                Ok(vec![go::comment(format!("{}: {}", lhs, ty))])
            }
        }
    }

    fn return_stmt(&mut self, value: Option<&Expr>) -> Result<Vec<Code>, TranslateError> {
        match value {
            Some(v) => {
                self.mark_routine(|r| r.returns_value = true);
                Ok(vec![go::ret(vec![self.expr(v)?])])
            }
            None => Ok(vec![go::ret(vec![])]),
        }
    }

    /// Only subscripted elements can be deleted
    fn delete_stmt(&mut self, targets: &[Expr]) -> Result<Vec<Code>, TranslateError> {
        let mut out = vec![];
        for target in targets {
            match &target.kind {
                ExprKind::Subscript { value, slice } if !matches!(slice.kind, ExprKind::Slice { .. }) => {
                    let collection = self.expr(value)?;
                    let key = self.expr(slice)?;
                    out.push(go::call(go::id("delete"), vec![collection, key]));
                }
                _ => {
                    return Err(TranslateError::InvalidDeleteTarget(
                        target.kind.kind_name(),
                        target.pos,
                    ))
                }
            }
        }
        Ok(out)
    }

    fn raise_stmt(
        &mut self,
        stmt: &Stmt,
        exc: Option<&Expr>,
        cause: Option<&Expr>,
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        let exc = match exc {
            Some(exc) => self.expr(exc)?,
            None if ctx.in_handler => return Ok(vec![go::ret(vec![go::id("err")])]),
            None => return Ok(vec![self.unknown_stmt("RAISE", stmt)?]),
        };
        let raised = go::ret(vec![go::call(self.runtime("RaisedException"), vec![exc])]);
        match cause {
            Some(cause) => {
                let cause = self.expr(cause)?;
                Ok(vec![go::trailing(raised, format!("cause: {}", cause))])
            }
            None => Ok(vec![raised]),
        }
    }

    fn assert_stmt(&mut self, test: &Expr, msg: Option<&Expr>) -> Result<Vec<Code>, TranslateError> {
        let cond = self.expr(test)?;
        let msg = match msg {
            Some(m) => self.expr(m)?,
            None => go::string(cond.to_string()),
        };
        Ok(vec![go::call(self.runtime("Assert"), vec![cond, msg])])
    }

    /// `import a.b as c` binds `c` to the target path `a/b`
    fn import_stmt(&mut self, names: &[Alias]) -> Vec<Code> {
        names
            .iter()
            .map(|alias| {
                let path = alias.name.replace('.', "/");
                match &alias.asname {
                    Some(local) => {
                        self.scopes.bind_import(local, &path);
                        go::comment(format!("import {} \"{}\"", local, path))
                    }
                    None => {
                        let head = alias.name.split('.').next().unwrap_or(&alias.name);
                        self.scopes.bind_import(head, head);
                        go::comment(format!("import \"{}\"", path))
                    }
                }
            })
            .collect()
    }

    /// `from m import n as a` makes `a` a qualified reference `m.N`
    fn import_from_stmt(&mut self, module: Option<&str>, names: &[Alias], level: u32) -> Vec<Code> {
        let mut path = "./".repeat(level as usize);
        path.push_str(&module.unwrap_or("").replace('.', "/"));
        for alias in names.iter().filter(|a| a.name != "*") {
            let local = alias.asname.as_deref().unwrap_or(&alias.name);
            self.scopes.bind_from_import(local, &path, &exported(&alias.name));
        }
        let imported = names
            .iter()
            .map(|a| match &a.asname {
                Some(local) => format!("{} as {}", a.name, local),
                None => a.name.clone(),
            })
            .join(", ");
        vec![go::comment(format!("from \"{}\" import {}", path, imported))]
    }

    /// Parameter list of a routine and, for methods, the receiver
    /// name taken from the first positional parameter.
    ///
    /// Annotations become parameter types, defaults are kept as
    /// comments and variadic parameters are marked.
    pub fn parameters(
        &mut self,
        args: &Arguments,
        receiver: bool,
    ) -> Result<(Vec<Param>, Option<String>), TranslateError> {
        let positional: Vec<&Arg> = args.positional().collect();
        let mut params = vec![];
        let mut recv = None;
        let first_default = positional.len().saturating_sub(args.defaults.len());

        for (i, arg) in positional.iter().enumerate() {
            if receiver && i == 0 {
                self.scopes.declare(&arg.arg);
                recv = Some(tables::ident(&arg.arg));
                continue;
            }
            let default = if i >= first_default {
                args.defaults.get(i - first_default)
            } else {
                None
            };
            params.push(self.parameter(arg, default, None)?);
        }

        if let Some(vararg) = &args.vararg {
            params.push(self.parameter(vararg, None, Some("..."))?);
        }
        for (i, arg) in args.kwonlyargs.iter().enumerate() {
            let default = args.kw_defaults.get(i).and_then(|d| d.as_ref());
            params.push(self.parameter(arg, default, None)?);
        }
        if let Some(kwarg) = &args.kwarg {
            params.push(self.parameter(kwarg, None, Some("..."))?);
        }
        Ok((params, recv))
    }

    fn parameter(&mut self, arg: &Arg, default: Option<&Expr>, mark: Option<&str>) -> Result<Param, TranslateError> {
        let mut ty = match &arg.annotation {
            Some(annotation) => self.expr(annotation)?,
            None => self.runtime("Any"),
        };
        if let Some(default) = default {
            let value = self.expr(default)?;
            ty = go::commented(ty, format!("={}", value));
        }
        if let Some(mark) = mark {
            ty = go::annotated(mark, ty);
        }
        self.scopes.declare(&arg.arg);
        Ok(go::param(tables::ident(&arg.arg), ty))
    }

    /// A function definition: a top-level declaration, a method with
    /// a receiver inside a class, or a closure bound to its name when
    /// nested.
    #[allow(clippy::too_many_arguments)]
    pub fn function_def(
        &mut self,
        name: &str,
        args: &Arguments,
        body: &[Stmt],
        decorators: &[Expr],
        returns: Option<&Expr>,
        is_async: bool,
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        let mut out = vec![];
        for decorator in decorators {
            let code = self.expr(decorator)?;
            out.push(go::comment(format!("@{}", code)));
        }
        if is_async {
            out.push(go::comment("async"));
        }
        let method = ctx.class_name;
        if method.is_none() {
            self.scopes.declare(name);
        }

        self.routines.push(Routine::default());
        let translated = self.scoped(|t| {
            let (params, recv) = t.parameters(args, method.is_some())?;
            let body = t.body(body, Context::routine())?;
            Ok((params, recv, body))
        });
        let routine = self.routines.pop().unwrap_or_default();
        let (params, recv, body) = translated?;

        let mut results = match returns {
            Some(r) if r.is_none() => vec![],
            Some(r) => vec![self.expr(r)?],
            None if routine.returns_value || routine.generator => vec![self.runtime("Any")],
            None => vec![],
        };
        if routine.generator {
            out.push(go::comment("generator: each yield returns its value on the first call"));
        }

        let decl = match method {
            Some(class) => {
                let recv = go::param(
                    recv.unwrap_or_else(|| DEFAULT_RECEIVER.to_string()),
                    go::pointer_to(go::id(tables::ident(class))),
                );
                let name = if name == "__str__" {
                    results = vec![go::id("string")];
                    "String".to_string()
                } else {
                    tables::ident(name)
                };
                go::func_decl(Some(recv), name, go::signature(params, results), body)
            }
            None if self.scopes.depth() == 0 => {
                go::func_decl(None, tables::ident(name), go::signature(params, results), body)
            }
            None => go::define(
                vec![go::id(tables::ident(name))],
                vec![go::func_lit(go::signature(params, results), body)],
            ),
        };
        out.push(decl);
        Ok(out)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::make::*;
    use crate::translate::{render_module, TranslateSettings};

    fn render(stmts: Vec<Stmt>) -> String {
        render_module(&module(stmts), &TranslateSettings::default()).unwrap()
    }

    #[test]
    pub fn test_declaration_then_rebind() {
        let text = render(vec![assign(name("x"), int(1)), assign(name("x"), int(2))]);
        assert_eq!(text, "var x = 1\nx = 2");
    }

    #[test]
    pub fn test_parallel_assignment() {
        let text = render(vec![
            assign(tuple(vec![name("a"), name("b")]), tuple(vec![int(1), int(2)])),
            assign(tuple(vec![name("a"), name("b")]), tuple(vec![name("b"), name("a")])),
        ]);
        assert_eq!(text, "a, b := 1, 2\na, b = b, a");
    }

    #[test]
    pub fn test_chained_assignment_evaluates_once() {
        let text = render(vec![assign_many(vec![name("a"), name("b")], call(name("f"), vec![]))]);
        assert_eq!(text, "var tmpΠ0 = f()\nvar a = tmpΠ0\nvar b = tmpΠ0");
    }

    #[test]
    pub fn test_attribute_and_subscript_targets() {
        let text = render(vec![
            assign(attr(name("p"), "x"), int(1)),
            assign(subscript(name("d"), str("k")), int(2)),
        ]);
        assert_eq!(text, "p.x = 1\nd[\"k\"] = 2");
    }

    #[test]
    pub fn test_mixed_tuple_targets_declare_new_names() {
        let text = render(vec![
            assign(tuple(vec![attr(name("p"), "x"), name("b")]), tuple(vec![int(1), int(2)])),
            assign(name("b"), int(3)),
            assign(tuple(vec![name("b"), subscript(name("d"), int(0))]), tuple(vec![int(4), int(5)])),
        ]);
        assert_eq!(
            text,
            "var b runtime.Any\np.x, b = 1, 2\nb = 3\nb, d[0] = 4, 5"
        );
    }

    #[test]
    pub fn test_augmented_assignment() {
        let text = render(vec![
            aug_assign(name("n"), BinOp::Add, int(1)),
            aug_assign(name("n"), BinOp::Pow, int(2)),
        ]);
        assert_eq!(text, "n += 1\nn = math.Pow(n, 2)");
    }

    #[test]
    pub fn test_annotated_assignment() {
        let text = render(vec![
            ann_assign(name("n"), name("int"), Some(int(0))),
            ann_assign(name("n"), name("int"), Some(int(1))),
            ann_assign(name("s"), name("str"), None),
        ]);
        assert_eq!(text, "var n int = 0\nn = 1\nvar s string");
    }

    #[test]
    pub fn test_docstring_and_pass() {
        let text = render(vec![expr_stmt(str(" Module docs. ")), pass()]);
        assert_eq!(text, "// Module docs.\n// pass");
    }

    #[test]
    pub fn test_raise() {
        let text = render(vec![def(
            "f",
            &[],
            vec![Stmt::new(StmtKind::Raise {
                exc: Some(Box::new(call(name("ValueError"), vec![str("bad")]))),
                cause: Some(Box::new(name("e"))),
            })],
        )]);
        assert_eq!(
            text,
            "func f() {\n    return runtime.RaisedException(ValueError(\"bad\")) // cause: e\n}"
        );
    }

    #[test]
    pub fn test_bare_raise_in_handler() {
        let text = render(vec![try_(
            vec![pass()],
            vec![handler(None, None, vec![raise(None, None)])],
            vec![],
            vec![],
        )]);
        assert!(text.contains("default:\n        return err"));
    }

    #[test]
    pub fn test_assert_message_from_condition() {
        let text = render(vec![
            assert(compare(name("x"), CmpOp::Gt, int(0)), None),
            assert(name("ok"), Some(str("not ok"))),
        ]);
        assert_eq!(
            text,
            "runtime.Assert(x > 0, \"x > 0\")\nruntime.Assert(ok, \"not ok\")"
        );
    }

    #[test]
    pub fn test_delete() {
        let text = render(vec![delete(vec![subscript(name("d"), str("k"))])]);
        assert_eq!(text, "delete(d, \"k\")");
    }

    #[test]
    pub fn test_delete_name_is_fatal() {
        let result = render_module(&module(vec![delete(vec![name("x").at(4, 4)])]), &TranslateSettings::default());
        assert_eq!(
            result,
            Err(TranslateError::InvalidDeleteTarget("ast.Name", crate::common::pos::Pos::new(4, 4)))
        );
    }

    #[test]
    pub fn test_global_is_comment() {
        assert_eq!(render(vec![global(&["a", "b"])]), "// global a, b");
    }

    #[test]
    pub fn test_imports() {
        let text = render(vec![
            import(vec![alias("os.path", None), alias("numpy", Some("np"))]),
            import_from("collections", vec![alias("deque", None)]),
            expr_stmt(call(attr(name("np"), "array"), vec![])),
            expr_stmt(call(name("deque"), vec![])),
        ]);
        assert_eq!(
            text,
            "// import \"os/path\"\n// import np \"numpy\"\n// from \"collections\" import deque\n\
             numpy.Array()\ncollections.Deque()"
        );
    }

    #[test]
    pub fn test_top_level_function() {
        let text = render(vec![def(
            "add",
            &["a", "b"],
            vec![ret(Some(binop(name("a"), BinOp::Add, name("b"))))],
        )]);
        assert_eq!(
            text,
            "func add(a runtime.Any, b runtime.Any) runtime.Any {\n    return a + b\n}"
        );
    }

    #[test]
    pub fn test_nested_function_is_closure() {
        let text = render(vec![def("outer", &[], vec![def("inner", &[], vec![pass()])])]);
        assert_eq!(
            text,
            "func outer() {\n    inner := func() {\n        // pass\n    }\n}"
        );
    }

    #[test]
    pub fn test_parameters() {
        let args = Arguments {
            args: vec![arg("a"), arg("b")],
            defaults: vec![int(1)],
            vararg: Some(arg("rest")),
            kwarg: Some(arg("opts")),
            ..Default::default()
        };
        let f = def_full("f", args, vec![pass()], vec![name("cached")], Some(none()));
        let text = render(vec![f]);
        assert_eq!(
            text,
            "// @cached\nfunc f(a runtime.Any, b runtime.Any /*=1*/, rest /*...*/runtime.Any, \
             opts /*...*/runtime.Any) {\n    // pass\n}"
        );
    }

    #[test]
    pub fn test_annotated_signature() {
        let args = Arguments {
            args: vec![Arg {
                arg: "n".to_string(),
                annotation: Some(Box::new(name("int"))),
                pos: Default::default(),
            }],
            ..Default::default()
        };
        let text = render(vec![def_full("sq", args, vec![ret(Some(name("n")))], vec![], Some(name("int")))]);
        assert_eq!(text, "func sq(n int) int {\n    return n\n}");
    }

    #[test]
    pub fn test_generator_function() {
        let text = render(vec![def("gen", &[], vec![yield_(Some(int(1)))])]);
        assert_eq!(
            text,
            "// generator: each yield returns its value on the first call\n\
             func gen() runtime.Any {\n    return 1 // yield\n}"
        );
    }

    #[test]
    pub fn test_generator_rejected() {
        let settings = TranslateSettings {
            generator_policy: GeneratorPolicy::Reject,
            ..Default::default()
        };
        let result = render_module(&module(vec![def("gen", &[], vec![yield_(None)])]), &settings);
        assert!(matches!(result, Err(TranslateError::GeneratorRejected(_))));
    }

    #[test]
    pub fn test_async_definition() {
        let stmt = Stmt::new(StmtKind::AsyncFunctionDef {
            name: "fetch".to_string(),
            args: Box::new(Arguments::default()),
            body: vec![pass()],
            decorator_list: vec![],
            returns: None,
        });
        assert_eq!(render(vec![stmt]), "// async\nfunc fetch() {\n    // pass\n}");
    }

    #[test]
    pub fn test_unmapped_statement() {
        let stmt = Stmt::new(StmtKind::Match {
            subject: Box::new(name("x")),
            cases: vec![],
        })
        .at(9, 0);
        let text = render(vec![stmt.clone()]);
        assert!(text.starts_with("// UNKNOWN-STMT: ast.Match"));
        assert!(text.ends_with("at line 9, col 0"));

        let strict = render_module(&module(vec![stmt]), &TranslateSettings::strict());
        assert!(matches!(strict, Err(TranslateError::Unknown(_, _))));
    }

    #[test]
    pub fn test_determinism() {
        let program = || {
            module(vec![
                assign(name("xs"), list_comp(name("x"), vec![comprehension(name("x"), name("ys"), vec![])])),
                assign(name("zs"), list_comp(name("x"), vec![comprehension(name("x"), name("ys"), vec![])])),
            ])
        };
        let settings = TranslateSettings::default();
        assert_eq!(
            render_module(&program(), &settings).unwrap(),
            render_module(&program(), &settings).unwrap()
        );
    }
}

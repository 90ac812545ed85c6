//! Loops, conditionals, exception handling and resource scopes.
use crate::syntax::ast::*;
use crate::target::code::{Case, Code};
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::tables;
use crate::translate::translator::{Context, Translator};
use tracing::trace;

/// A translated loop header, waiting for its body
enum LoopHeader {
    /// `for v := start; v < stop; v += step`
    Counted {
        var: Code,
        start: Code,
        stop: Code,
        step: Code,
        descending: bool,
    },
    /// `for vars := range expr`
    Range {
        vars: Vec<Code>,
        define: bool,
        expr: Code,
    },
}

impl LoopHeader {
    fn into_loop(self, body: Vec<Code>) -> Code {
        match self {
            LoopHeader::Counted {
                var,
                start,
                stop,
                step,
                descending,
            } => {
                let cmp = if descending { ">" } else { "<" };
                go::for_clause(
                    Some(go::define(vec![var.clone()], vec![start])),
                    Some(go::binary(var.clone(), cmp, stop)),
                    Some(go::op_assign(var, "+=", step)),
                    body,
                )
            }
            LoopHeader::Range { vars, define, expr } => go::for_range(vars, define, expr, body),
        }
    }
}

/// Literal step below zero, counting down
fn is_negative(e: &Expr) -> bool {
    match &e.kind {
        ExprKind::Int { value } => *value < 0,
        ExprKind::Float { value } => *value < 0.0,
        ExprKind::UnaryOp {
            op: UnaryOp::USub,
            operand,
        } => matches!(operand.kind, ExprKind::Int { .. } | ExprKind::Float { .. }),
        _ => false,
    }
}

/// Iterables whose range form yields (index, element) pairs
fn is_sequence(e: &Expr) -> bool {
    matches!(
        e.kind,
        ExprKind::List { .. } | ExprKind::Tuple { .. } | ExprKind::Str { .. } | ExprKind::ListComp { .. }
    )
}

impl<'s> Translator<'s> {
    /// Translate a loop over `iter` binding `target`, in a fresh scope
    /// holding the loop variables. `body` builds the loop body inside
    /// that scope.
    pub fn for_loop<F>(&mut self, target: &Expr, iter: &Expr, body: F) -> Result<Code, TranslateError>
    where
        F: FnOnce(&mut Self) -> Result<Vec<Code>, TranslateError>,
    {
        self.scoped(|t| {
            let header = t.loop_header(target, iter)?;
            let body = body(t)?;
            Ok(header.into_loop(body))
        })
    }

    fn loop_header(&mut self, target: &Expr, iter: &Expr) -> Result<LoopHeader, TranslateError> {
        if let Some(header) = self.counted_header(target, iter)? {
            return Ok(header);
        }

        if let ExprKind::Call { func, args, keywords } = &iter.kind {
            if func.as_name() == Some("enumerate") && !self.scopes.is_known("enumerate") && args.len() == 1 && keywords.is_empty() {
                if let ExprKind::Tuple { elts } = &target.kind {
                    if elts.len() == 2 {
                        let expr = self.expr(&args[0])?;
                        let (vars, define) = self.loop_targets(elts)?;
                        return Ok(LoopHeader::Range { vars, define, expr });
                    }
                }
            }
        }

        let expr = self.expr(iter)?;
        let (vars, define) = match &target.kind {
            ExprKind::Tuple { elts } | ExprKind::List { elts } => self.loop_targets(elts)?,
            ExprKind::Name { .. } if is_sequence(iter) => {
                let (mut vars, define) = self.loop_targets(std::slice::from_ref(target))?;
                vars.insert(0, go::id("_"));
                (vars, define)
            }
            _ => self.loop_targets(std::slice::from_ref(target))?,
        };
        Ok(LoopHeader::Range { vars, define, expr })
    }

    /// `for i in range(...)` as a counted loop
    fn counted_header(&mut self, target: &Expr, iter: &Expr) -> Result<Option<LoopHeader>, TranslateError> {
        let (func, args, keywords) = match &iter.kind {
            ExprKind::Call { func, args, keywords } => (func, args, keywords),
            _ => return Ok(None),
        };
        let var = match target.as_name() {
            Some(var) => var,
            None => return Ok(None),
        };
        if func.as_name() != Some("range") || self.scopes.is_known("range") || !keywords.is_empty() {
            return Ok(None);
        }

        let (start, stop, step) = match args.as_slice() {
            [stop] => (None, stop, None),
            [start, stop] => (Some(start), stop, None),
            [start, stop, step] => (Some(start), stop, Some(step)),
            _ => return Err(TranslateError::RangeArity(args.len(), iter.pos)),
        };
        trace!(var, "counted loop");

        let start = match start {
            Some(e) => self.expr(e)?,
            None => go::int(0),
        };
        let stop = self.expr(stop)?;
        let descending = step.map(is_negative).unwrap_or(false);
        let step = match step {
            Some(e) => self.expr(e)?,
            None => go::int(1),
        };
        self.scopes.declare(var);
        Ok(Some(LoopHeader::Counted {
            var: go::id(tables::ident(var)),
            start,
            stop,
            step,
            descending,
        }))
    }

    /// Loop variables; names are declared in the loop scope, any other
    /// target is assigned in place
    fn loop_targets(&mut self, targets: &[Expr]) -> Result<(Vec<Code>, bool), TranslateError> {
        let mut vars = vec![];
        let mut define = true;
        for target in targets {
            match target.as_name() {
                Some(name) => {
                    self.scopes.declare(name);
                    vars.push(go::id(tables::ident(name)));
                }
                None => {
                    define = false;
                    vars.push(self.expr(target)?);
                }
            }
        }
        Ok((vars, define))
    }

    /// Sentinel for a loop with an `else` clause
    fn loop_sentinel(&mut self, orelse: &[Stmt]) -> Option<String> {
        if orelse.is_empty() {
            None
        } else {
            Some(self.fresh("broke"))
        }
    }

    /// Wrap a translated loop with its `else` clause: the sentinel is
    /// cleared before the loop and tested after it
    fn with_loop_else(
        &mut self,
        lp: Code,
        sentinel: Option<String>,
        orelse: &[Stmt],
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        match sentinel {
            None => Ok(vec![lp]),
            Some(flag) => {
                let otherwise = self.nested_body(orelse, ctx)?;
                Ok(vec![
                    go::define(vec![go::id(&flag)], vec![go::bool(false)]),
                    lp,
                    go::if_(go::not(go::id(&flag)), otherwise, None),
                ])
            }
        }
    }

    pub fn for_stmt(
        &mut self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        let sentinel = self.loop_sentinel(orelse);
        let inner = ctx.in_loop(sentinel.as_deref());
        let lp = self.for_loop(target, iter, |t| t.body(body, inner))?;
        self.with_loop_else(lp, sentinel, orelse, ctx)
    }

    pub fn while_stmt(
        &mut self,
        test: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        let sentinel = self.loop_sentinel(orelse);
        let inner = ctx.in_loop(sentinel.as_deref());
        let forever = matches!(
            test.kind,
            ExprKind::NameConstant {
                value: Singleton::True
            }
        );
        let lp = if forever {
            go::for_ever(self.nested_body(body, inner)?)
        } else {
            let cond = self.expr(test)?;
            go::for_cond(cond, self.nested_body(body, inner)?)
        };
        self.with_loop_else(lp, sentinel, orelse, ctx)
    }

    /// `break`, recording the early exit for a loop `else`
    pub fn break_stmt(&mut self, ctx: Context) -> Vec<Code> {
        match ctx.loop_sentinel {
            Some(flag) => vec![go::assign(vec![go::id(flag)], vec![go::bool(true)]), go::break_()],
            None => vec![go::break_()],
        }
    }

    /// `if` with `elif` chains as `else if`
    pub fn if_stmt(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt], ctx: Context) -> Result<Code, TranslateError> {
        let cond = self.expr(test)?;
        let then = self.nested_body(body, ctx)?;
        let otherwise = match orelse {
            [] => None,
            [Stmt {
                kind: StmtKind::If { test, body, orelse },
                ..
            }] => Some(go::else_if(self.if_stmt(test, body, orelse, ctx)?)),
            _ => Some(go::else_block(self.nested_body(orelse, ctx)?)),
        };
        Ok(go::if_(cond, then, otherwise))
    }

    /// Exception handling.
    ///
    /// The body runs in a closure returning `error`; a non-nil error is
    /// dispatched by a switch over the handlers' exception expressions.
    /// The `else` clause runs when no error was returned and `finally`
    /// follows unconditionally as a block.
    pub fn try_stmt(
        &mut self,
        body: &[Stmt],
        handlers: &[ExceptHandler],
        orelse: &[Stmt],
        finalbody: &[Stmt],
        ctx: Context,
    ) -> Result<Vec<Code>, TranslateError> {
        let err = go::id("err");

        let mut attempt = vec![go::comment("try")];
        attempt.extend(self.nested_body(body, ctx)?);
        attempt.push(go::ret(vec![go::nil()]));
        let init = go::define(vec![err.clone()], vec![go::iife(vec![go::id("error")], attempt)]);

        let on_error = if handlers.is_empty() {
            if self.in_routine() {
                vec![go::ret(vec![err.clone()])]
            } else {
                vec![go::call(go::id("panic"), vec![err.clone()])]
            }
        } else {
            let mut cases = vec![];
            for handler in handlers {
                cases.push(self.handler(handler, ctx)?);
            }
            vec![go::switch(Some(err.clone()), cases)]
        };

        let otherwise = if orelse.is_empty() {
            None
        } else {
            Some(go::else_block(self.nested_body(orelse, ctx)?))
        };

        let mut out = vec![go::if_init(init, go::binary(err, "!=", go::nil()), on_error, otherwise)];
        if !finalbody.is_empty() {
            let mut cleanup = vec![go::comment("finally")];
            cleanup.extend(self.nested_body(finalbody, ctx)?);
            out.push(go::block(cleanup));
        }
        Ok(out)
    }

    fn handler(&mut self, handler: &ExceptHandler, ctx: Context) -> Result<Case, TranslateError> {
        let exprs = match &handler.typ {
            None => vec![],
            Some(Expr {
                kind: ExprKind::Tuple { elts },
                ..
            }) => self.expr_list(elts)?,
            Some(typ) => vec![self.expr(typ)?],
        };

        let body = self.scoped(|t| {
            let mut out = vec![];
            if let Some(name) = &handler.name {
                t.scopes.declare(name);
                let local = go::id(tables::ident(name));
                out.push(go::define(vec![local.clone()], vec![go::id("err")]));
                out.push(go::assign(vec![go::id("_")], vec![local]));
            }
            out.extend(t.body(&handler.body, ctx.in_handler())?);
            Ok(out)
        })?;

        Ok(if exprs.is_empty() {
            go::default(body)
        } else {
            go::case(exprs, body)
        })
    }

    /// Resource scope.
    ///
    /// Each context value is bound (to its alias or a fresh name) and
    /// released by `runtime.Release`: deferred inside a routine, so it
    /// runs on every exit path, or appended after the body at module
    /// level.
    pub fn with_stmt(&mut self, items: &[WithItem], body: &[Stmt], ctx: Context) -> Result<Code, TranslateError> {
        self.scoped(|t| {
            let deferred = t.in_routine();
            let mut out = vec![go::comment("with")];
            let mut releases = vec![];

            for item in items {
                let value = t.expr(&item.context_expr)?;
                let bound = match &item.optional_vars {
                    Some(Expr {
                        kind: ExprKind::Name { id },
                        ..
                    }) => {
                        t.scopes.declare(id);
                        let local = go::id(tables::ident(id));
                        out.push(go::define(vec![local.clone()], vec![value]));
                        local
                    }
                    Some(target) => {
                        let target = t.expr(target)?;
                        out.push(go::assign(vec![target.clone()], vec![value]));
                        target
                    }
                    None => {
                        let local = go::id(t.fresh("with"));
                        out.push(go::define(vec![local.clone()], vec![value]));
                        local
                    }
                };
                let release = go::call(t.runtime("Release"), vec![bound]);
                if deferred {
                    out.push(go::defer(release));
                } else {
                    releases.push(release);
                }
            }

            out.extend(t.body(body, ctx)?);
            out.extend(releases.into_iter().rev());
            Ok(go::block(out))
        })
    }
}

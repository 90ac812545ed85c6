//! Call translation, including the rewrites of well-known builtins
//! and library functions.
use crate::syntax::ast::*;
use crate::target::code::Code;
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::translator::Translator;
use tracing::trace;

impl<'s> Translator<'s> {
    pub fn call(&mut self, func: &Expr, args: &[Expr], keywords: &[Keyword]) -> Result<Code, TranslateError> {
        if let Some(code) = self.rewrite_call(func, args, keywords)? {
            return Ok(code);
        }
        let callee = self.expr(func)?;
        let args = self.arguments(args, keywords)?;
        Ok(go::call(callee, args))
    }

    /// Argument list in target order: plain positionals, keywords
    /// marked with their name, then the unpacked sequences and
    /// mappings.
    fn arguments(&mut self, args: &[Expr], keywords: &[Keyword]) -> Result<Vec<Code>, TranslateError> {
        let mut out = vec![];
        let mut unpacked = vec![];
        for a in args {
            match &a.kind {
                ExprKind::Starred { value } => unpacked.push(go::commented(self.expr(value)?, "...")),
                _ => out.push(self.expr(a)?),
            }
        }
        let mut mappings = vec![];
        for k in keywords {
            let value = self.expr(&k.value)?;
            match &k.arg {
                Some(name) => out.push(go::annotated(format!("{}=", name), value)),
                None => mappings.push(go::commented(value, "...")),
            }
        }
        out.extend(unpacked);
        out.extend(mappings);
        Ok(out)
    }

    /// Special-cased callees, or `None` for the generic rule
    fn rewrite_call(
        &mut self,
        func: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<Option<Code>, TranslateError> {
        match &func.kind {
            ExprKind::Name { id } if !self.scopes.is_known(id) => self.builtin_call(id, args, keywords),
            ExprKind::Attribute { value, attr } => self.method_call(value, attr, args, keywords),
            _ => Ok(None),
        }
    }

    fn builtin_call(
        &mut self,
        id: &str,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<Option<Code>, TranslateError> {
        let target = match id {
            "print" => go::qual("fmt", "Println"),
            "open" => go::qual("os", "Open"),
            "type" if args.len() == 1 => go::qual("reflect", "TypeOf"),
            "str" if args.len() == 1 => go::qual("fmt", "Sprint"),
            "range" => self.runtime("Range"),
            "isinstance" if args.len() == 2 && keywords.is_empty() => {
                return self.isinstance(&args[0], &args[1]).map(Some);
            }
            _ => return Ok(None),
        };
        trace!(builtin = id, "rewriting call");
        let args = self.arguments(args, keywords)?;
        Ok(Some(go::call(target, args)))
    }

    /// `isinstance(obj, T)` as a type assertion probe
    fn isinstance(&mut self, obj: &Expr, ty: &Expr) -> Result<Code, TranslateError> {
        let value = self.expr(obj)?;
        let ty_code = self.expr(ty)?;
        let ok = go::id("ok");
        Ok(go::iife(
            vec![go::id("bool")],
            vec![
                go::define(vec![go::id("_"), ok.clone()], vec![go::type_assert(value, ty_code)]),
                go::ret(vec![ok]),
            ],
        ))
    }

    fn method_call(
        &mut self,
        value: &Expr,
        attr: &str,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<Option<Code>, TranslateError> {
        if !keywords.is_empty() {
            return Ok(None);
        }
        let module = value
            .as_name()
            .and_then(|n| self.scopes.import_path(n))
            .map(|p| p.to_string());

        match (module.as_deref(), attr, args.len()) {
            (Some("sys"), "exit", _) => {
                let code = match args.first() {
                    Some(a) => self.expr(a)?,
                    None => go::int(-1),
                };
                Ok(Some(go::call(go::qual("os", "Exit"), vec![code])))
            }
            (Some("time"), "sleep", 1) => {
                let secs = self.expr(&args[0])?;
                let second = go::call(go::id("float64"), vec![go::qual("time", "Second")]);
                let duration = go::call(go::qual("time", "Duration"), vec![go::binary(secs, "*", second)]);
                Ok(Some(go::call(go::qual("time", "Sleep"), vec![duration])))
            }
            (Some("time"), "time", 0) => Ok(Some(go::call(go::qual("time", "Now"), vec![]))),
            (Some(_), _, _) => Ok(None),
            (None, "read", _) | (None, "write", _) | (None, "close", _) => {
                let receiver = self.expr(value)?;
                let args = self.expr_list(args)?;
                Ok(Some(go::call(go::dot(receiver, super::expr::exported(attr)), args)))
            }
            // iterating a mapping yields its pairs directly
            (None, "items", 0) => self.expr(value).map(Some),
            (None, "upper", 0) => self.strings_call("ToUpper", value, None),
            (None, "lower", 0) => self.strings_call("ToLower", value, None),
            (None, "strip", 0) => self.strings_call("TrimSpace", value, None),
            (None, "startswith", 1) => self.strings_call("HasPrefix", value, Some(&args[0])),
            (None, "endswith", 1) => self.strings_call("HasSuffix", value, Some(&args[0])),
            (None, "split", 1) => self.strings_call("Split", value, Some(&args[0])),
            (None, "join", 1) => {
                // sep.join(xs) => strings.Join(xs, sep)
                let sep = self.expr(value)?;
                let items = self.expr(&args[0])?;
                Ok(Some(go::call(go::qual("strings", "Join"), vec![items, sep])))
            }
            _ => Ok(None),
        }
    }

    /// `strings.F(receiver[, arg])`
    fn strings_call(&mut self, f: &str, receiver: &Expr, arg: Option<&Expr>) -> Result<Option<Code>, TranslateError> {
        let mut args = vec![self.expr(receiver)?];
        if let Some(a) = arg {
            args.push(self.expr(a)?);
        }
        Ok(Some(go::call(go::qual("strings", f), args)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::make::*;
    use crate::translate::TranslateSettings;

    fn render_with<F: FnOnce(&mut Translator)>(e: Expr, setup: F) -> String {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        setup(&mut t);
        t.expr(&e).unwrap().to_string()
    }

    fn render(e: Expr) -> String {
        render_with(e, |_| {})
    }

    #[test]
    pub fn test_print() {
        assert_eq!(render(call(name("print"), vec![str("hi"), name("x")])), "fmt.Println(\"hi\", x)");
    }

    #[test]
    pub fn test_shadowed_builtin_is_called_directly() {
        let text = render_with(call(name("print"), vec![int(1)]), |t| t.scopes.declare("print"));
        assert_eq!(text, "print(1)");
    }

    #[test]
    pub fn test_argument_order() {
        let e = Expr::new(ExprKind::Call {
            func: Box::new(name("f")),
            args: vec![starred(name("xs")), int(1)],
            keywords: vec![keyword(Some("k"), int(2)), keyword(None, name("kw"))],
        });
        assert_eq!(render(e), "f(1, /*k=*/2, xs /*...*/, kw /*...*/)");
    }

    #[test]
    pub fn test_isinstance() {
        let text = render(call(name("isinstance"), vec![name("x"), name("int")]));
        assert_eq!(text, "func() bool {\n    _, ok := x.(int)\n    return ok\n}()");
    }

    #[test]
    pub fn test_string_methods() {
        assert_eq!(render(call(attr(name("s"), "upper"), vec![])), "strings.ToUpper(s)");
        assert_eq!(
            render(call(attr(name("s"), "startswith"), vec![str("#")])),
            "strings.HasPrefix(s, \"#\")"
        );
        assert_eq!(
            render(call(attr(str(","), "join"), vec![name("xs")])),
            "strings.Join(xs, \",\")"
        );
        assert_eq!(
            render(call(attr(name("line"), "split"), vec![str(" ")])),
            "strings.Split(line, \" \")"
        );
    }

    #[test]
    pub fn test_file_methods() {
        assert_eq!(render(call(attr(name("f"), "close"), vec![])), "f.Close()");
        assert_eq!(render(call(attr(name("d"), "items"), vec![])), "d");
    }

    #[test]
    pub fn test_module_functions() {
        let setup = |t: &mut Translator| {
            t.scopes.bind_import("sys", "sys");
            t.scopes.bind_import("time", "time");
        };
        assert_eq!(render_with(call(attr(name("sys"), "exit"), vec![]), setup), "os.Exit(-1)");
        assert_eq!(
            render_with(call(attr(name("time"), "sleep"), vec![float(0.5)]), setup),
            "time.Sleep(time.Duration(0.5 * float64(time.Second)))"
        );
        assert_eq!(render_with(call(attr(name("time"), "time"), vec![]), setup), "time.Now()");
    }

    #[test]
    pub fn test_unbound_module_is_not_rewritten() {
        assert_eq!(render(call(attr(name("sys"), "exit"), vec![int(1)])), "sys.exit(1)");
    }

    #[test]
    pub fn test_range_outside_loop() {
        assert_eq!(render(call(name("range"), vec![int(3)])), "runtime.Range(3)");
    }
}

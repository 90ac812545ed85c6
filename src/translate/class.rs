//! Class definitions.
//!
//! A class becomes a struct. Base classes and keywords are recorded in
//! a leading comment, class attributes become fields annotated with
//! their value, and methods are buffered in the class scope to be
//! emitted as receiver functions after the struct.
use crate::syntax::ast::*;
use crate::target::code::{Code, Field};
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::tables;
use crate::translate::translator::{Context, Translator};
use itertools::Itertools;
use tracing::debug;

impl<'s> Translator<'s> {
    pub fn class_def(
        &mut self,
        name: &str,
        bases: &[Expr],
        keywords: &[Keyword],
        body: &[Stmt],
        decorators: &[Expr],
    ) -> Result<Vec<Code>, TranslateError> {
        debug!(class = name, "class definition");
        let mut out = vec![];
        for decorator in decorators {
            let code = self.expr(decorator)?;
            out.push(go::comment(format!("@{}", code)));
        }
        self.scopes.declare(name);

        let mut fields = vec![];
        if let Some(header) = self.bases_comment(bases, keywords)? {
            fields.push(go::field_comment(header));
        }
        self.scoped(|t| {
            let ctx = Context::default().in_class(name);
            for stmt in body {
                fields.extend(t.class_member(name, stmt, ctx)?);
            }
            Ok(())
        })?;

        out.push(go::struct_decl(tables::ident(name), fields));
        Ok(out)
    }

    /// `bases: A, B, metaclass=M`, naming the classes as written
    fn bases_comment(&mut self, bases: &[Expr], keywords: &[Keyword]) -> Result<Option<String>, TranslateError> {
        if bases.is_empty() && keywords.is_empty() {
            return Ok(None);
        }
        let mut parts = vec![];
        for base in bases {
            parts.push(self.source_name(base)?);
        }
        for keyword in keywords {
            let value = self.source_name(&keyword.value)?;
            match &keyword.arg {
                Some(arg) => parts.push(format!("{}={}", arg, value)),
                None => parts.push(format!("**{}", value)),
            }
        }
        Ok(Some(format!("bases: {}", parts.iter().join(", "))))
    }

    /// Fields contributed by one statement of a class body; methods
    /// go to the pending buffer of the class scope
    fn class_member(&mut self, class: &str, stmt: &Stmt, ctx: Context) -> Result<Vec<Field>, TranslateError> {
        match &stmt.kind {
            StmtKind::Pass => Ok(vec![]),
            StmtKind::Expr { value } => match &value.kind {
                ExprKind::Str { value } => Ok(vec![go::field_comment(value.trim())]),
                _ => Err(self.unexpected(class, stmt)),
            },
            StmtKind::Assign { targets, value } if targets.iter().all(|t| t.as_name().is_some()) => {
                let value = self.expr(value)?;
                Ok(targets
                    .iter()
                    .filter_map(Expr::as_name)
                    .map(|n| go::field(tables::ident(n), self.runtime("Any"), Some(format!("= {}", value))))
                    .collect())
            }
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                ..
            } => match target.as_name() {
                Some(n) => {
                    let ty = self.expr(annotation)?;
                    let comment = match value {
                        Some(v) => Some(format!("= {}", self.expr(v)?)),
                        None => None,
                    };
                    Ok(vec![go::field(tables::ident(n), ty, comment)])
                }
                None => Err(self.unexpected(class, stmt)),
            },
            StmtKind::FunctionDef {
                name,
                args,
                body,
                decorator_list,
                returns,
            }
            | StmtKind::AsyncFunctionDef {
                name,
                args,
                body,
                decorator_list,
                returns,
            } => {
                let is_async = matches!(stmt.kind, StmtKind::AsyncFunctionDef { .. });
                let method = self.function_def(name, args, body, decorator_list, returns.as_deref(), is_async, ctx)?;
                for code in method {
                    self.scopes.add_method(code);
                }
                Ok(vec![])
            }
            _ => Err(self.unexpected(class, stmt)),
        }
    }

    fn source_name(&mut self, e: &Expr) -> Result<String, TranslateError> {
        match dotted_name(e) {
            Some(name) => Ok(name),
            None => Ok(self.expr(e)?.to_string()),
        }
    }

    fn unexpected(&self, class: &str, stmt: &Stmt) -> TranslateError {
        TranslateError::UnexpectedClassStatement(stmt.kind.kind_name(), class.to_string(), stmt.pos)
    }
}

/// `a.b.c` for a name or attribute chain
fn dotted_name(e: &Expr) -> Option<String> {
    match &e.kind {
        ExprKind::Name { id } => Some(id.clone()),
        ExprKind::Attribute { value, attr } => dotted_name(value).map(|base| format!("{}.{}", base, attr)),
        _ => None,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::make::*;
    use crate::translate::{render_module, TranslateSettings};

    fn render(stmts: Vec<Stmt>) -> Result<String, TranslateError> {
        render_module(&module(stmts), &TranslateSettings::default())
    }

    #[test]
    pub fn test_struct_then_methods() {
        let point = class(
            "Point",
            vec![name("Base")],
            vec![
                expr_stmt(str("A point.")),
                assign(name("x"), int(0)),
                ann_assign(name("y"), name("float"), None),
                def("norm", &["self"], vec![ret(Some(attr(name("self"), "x")))]),
                def("__str__", &["self"], vec![ret(Some(str("p")))]),
            ],
        );
        let text = render(vec![point, pass()]).unwrap();
        assert_eq!(
            text,
            "type Point struct {\n    // bases: Base\n    // A point.\n    x runtime.Any // = 0\n    \
             y float64\n}\nfunc (self *Point) norm() runtime.Any {\n    return self.x\n}\n\
             func (self *Point) String() string {\n    return \"p\"\n}\n// pass"
        );
    }

    #[test]
    pub fn test_bases_keep_source_names() {
        let shape = Stmt::new(StmtKind::ClassDef {
            name: "Shape".to_string(),
            bases: vec![name("object"), attr(name("abc"), "ABC")],
            keywords: vec![keyword(Some("metaclass"), name("dict"))],
            body: vec![pass()],
            decorator_list: vec![],
        });
        let text = render(vec![shape]).unwrap();
        assert_eq!(
            text,
            "type Shape struct {\n    // bases: object, abc.ABC, metaclass=dict\n}"
        );
    }

    #[test]
    pub fn test_methods_are_not_nested_in_struct() {
        let text = render(vec![class(
            "C",
            vec![],
            vec![def("a", &["self"], vec![pass()]), def("b", &["self"], vec![pass()])],
        )])
        .unwrap();
        let struct_end = text.find("}\n").unwrap();
        assert_eq!(text[..struct_end].matches("func").count(), 0);
        assert_eq!(text.matches("func (self *C)").count(), 2);
    }

    #[test]
    pub fn test_method_parameters_skip_receiver() {
        let text = render(vec![class(
            "Counter",
            vec![],
            vec![def("add", &["this", "n"], vec![aug_assign(attr(name("this"), "total"), BinOp::Add, name("n"))])],
        )])
        .unwrap();
        assert!(text.contains("func (this *Counter) add(n runtime.Any) {\n    this.total += n\n}"));
    }

    #[test]
    pub fn test_unexpected_statement_is_fatal() {
        let bad = class("C", vec![], vec![for_(name("x"), name("xs"), vec![pass()], vec![]).at(3, 4)]);
        match render(vec![bad]) {
            Err(TranslateError::UnexpectedClassStatement(kind, class, pos)) => {
                assert_eq!(kind, "ast.For");
                assert_eq!(class, "C");
                assert_eq!(pos.line, 3);
            }
            other => panic!("expected fatal error, got {:?}", other),
        }
    }

    #[test]
    pub fn test_nested_class_methods_follow_enclosing_statement() {
        let text = render(vec![def(
            "factory",
            &[],
            vec![class("Inner", vec![], vec![def("m", &["self"], vec![pass()])])],
        )])
        .unwrap();
        let factory = text.find("func factory()").unwrap();
        let method = text.find("func (self *Inner) m()").unwrap();
        assert!(factory < method);
    }
}

//! Translator state shared by the expression and statement passes.
use crate::syntax::ast::{Module, Stmt};
use crate::target::code::Code;
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::scope::ScopeChain;
use crate::translate::tables::{self, Renamed};
use crate::translate::TranslateSettings;
use tracing::{debug, trace};

/// Ambient context threaded through statement translation
#[derive(Debug, Clone, Copy, Default)]
pub struct Context<'c> {
    /// Enclosing class, making function definitions methods
    pub class_name: Option<&'c str>,
    /// Flag to set on `break` for a loop with an `else` clause
    pub loop_sentinel: Option<&'c str>,
    /// Inside an exception handler, where `err` is bound
    pub in_handler: bool,
}

impl<'c> Context<'c> {
    /// Context for the body of a routine
    pub fn routine() -> Self {
        Context::default()
    }

    /// Context for the body of a loop with the given sentinel
    pub fn in_loop(self, sentinel: Option<&'c str>) -> Self {
        Context {
            loop_sentinel: sentinel,
            ..self
        }
    }

    pub fn in_class(self, name: &'c str) -> Self {
        Context {
            class_name: Some(name),
            ..self
        }
    }

    pub fn in_handler(self) -> Self {
        Context {
            in_handler: true,
            ..self
        }
    }
}

/// What has been seen in the body of the routine being translated
#[derive(Debug, Clone, Copy, Default)]
pub struct Routine {
    /// A `yield` or `yield from` statement was seen
    pub generator: bool,
    /// A `return` with a value was seen
    pub returns_value: bool,
}

/// Translates one module.
pub struct Translator<'s> {
    pub(crate) settings: &'s TranslateSettings,
    pub(crate) scopes: ScopeChain,
    pub(crate) routines: Vec<Routine>,
    counter: usize,
}

impl<'s> Translator<'s> {
    pub fn new(settings: &'s TranslateSettings) -> Self {
        Translator {
            settings,
            scopes: ScopeChain::new(),
            routines: vec![],
            counter: 0,
        }
    }

    /// Translate a whole module into its fragment sequence
    pub fn module(&mut self, module: &Module) -> Result<Vec<Code>, TranslateError> {
        debug!(statements = module.body.len(), "translating module");
        self.body(&module.body, Context::default())
    }

    /// Translate a statement sequence in the current scope
    pub fn body(&mut self, stmts: &[Stmt], ctx: Context) -> Result<Vec<Code>, TranslateError> {
        let mut out = vec![];
        for stmt in stmts {
            if self.settings.line_comments && stmt.pos.is_valid() {
                out.push(go::comment(format!("line {}", stmt.pos.line)));
            }
            out.extend(self.statement(stmt, ctx)?);
            if self.scopes.depth() == 0 {
                out.extend(self.scopes.take_root_methods());
            }
        }
        Ok(out)
    }

    /// Translate a statement sequence in a fresh child scope
    pub fn nested_body(&mut self, stmts: &[Stmt], ctx: Context) -> Result<Vec<Code>, TranslateError> {
        self.scoped(|t| t.body(stmts, ctx))
    }

    /// Run `f` in a fresh child scope, popping it even on error
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T, TranslateError>
    where
        F: FnOnce(&mut Self) -> Result<T, TranslateError>,
    {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// A name for a synthesized temporary, unique within the module
    pub fn fresh(&mut self, base: &str) -> String {
        let name = format!("{}Π{}", base, self.counter);
        self.counter += 1;
        trace!(name = name.as_str(), "fresh name");
        name
    }

    /// Reference to a name exported by the runtime support package
    pub fn runtime(&self, name: &str) -> Code {
        go::qual(&self.settings.runtime_path, name)
    }

    /// Reference to a source name.
    ///
    /// Declared names are only made keyword safe; otherwise
    /// from-imports resolve to their qualified target and builtin
    /// type names map to their target equivalents.
    pub fn name_ref(&self, id: &str) -> Code {
        if self.scopes.is_known(id) {
            return go::id(tables::ident(id));
        }
        if let Some((path, name)) = self.scopes.from_import(id) {
            return go::qual(path, name);
        }
        match tables::rename(id) {
            Renamed::Ident(name) => go::id(name),
            Renamed::Runtime(name) => self.runtime(name),
        }
    }

    /// Record on the innermost routine
    pub(crate) fn mark_routine<F: FnOnce(&mut Routine)>(&mut self, f: F) {
        if let Some(routine) = self.routines.last_mut() {
            f(routine)
        }
    }

    /// Whether translation is inside a routine body
    pub fn in_routine(&self) -> bool {
        !self.routines.is_empty()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::make::*;

    #[test]
    pub fn test_fresh_names_are_sequential() {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        assert_eq!(t.fresh("lc"), "lcΠ0");
        assert_eq!(t.fresh("cmp"), "cmpΠ1");
    }

    #[test]
    pub fn test_name_references() {
        let settings = TranslateSettings::default();
        let mut t = Translator::new(&settings);
        assert_eq!(t.name_ref("list"), go::qual("pygo/runtime", "List"));
        t.scopes.declare("list");
        assert_eq!(t.name_ref("list"), go::id("list"));
        t.scopes.bind_from_import("join", "path", "Join");
        assert_eq!(t.name_ref("join"), go::qual("path", "Join"));
        assert_eq!(t.name_ref("type"), go::id("typeΠ"));
    }

    #[test]
    pub fn test_line_comments() {
        let settings = TranslateSettings {
            line_comments: true,
            ..Default::default()
        };
        let module = module(vec![pass().at(3, 0)]);
        let out = Translator::new(&settings).module(&module).unwrap();
        assert_eq!(out, vec![go::comment("line 3"), go::comment("pass")]);
    }
}

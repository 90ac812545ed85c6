//! The scope chain: lexical nesting, known names and import bindings.
use crate::target::code::Code;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// One level of lexical nesting
#[derive(Debug, Default)]
struct Frame {
    /// Names declared at this level
    names: HashSet<String>,
    /// Method fragments waiting to be emitted after their struct
    pending_methods: Vec<Code>,
}

/// A stack of scope frames.
///
/// The innermost frame is the last. Import bindings are module-global
/// and shared by every frame; declared names are per frame.
#[derive(Debug)]
pub struct ScopeChain {
    frames: Vec<Frame>,
    /// `import path as alias`: alias to target import path
    imports: HashMap<String, String>,
    /// `from module import name as local`: local to (path, name)
    from_imports: HashMap<String, (String, String)>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        ScopeChain::new()
    }
}

impl ScopeChain {
    /// A chain holding only the module (root) frame
    pub fn new() -> Self {
        ScopeChain {
            frames: vec![Frame::default()],
            imports: HashMap::new(),
            from_imports: HashMap::new(),
        }
    }

    /// Nesting depth; zero at module level
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
        trace!(depth = self.depth(), "push scope");
    }

    /// Discard the innermost frame, handing its pending methods to
    /// the parent. The root frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        if let Some(frame) = self.frames.pop() {
            if let Some(parent) = self.frames.last_mut() {
                parent.pending_methods.extend(frame.pending_methods);
            }
        }
        trace!(depth = self.depth(), "pop scope");
    }

    fn current(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Mark a name as known in the current frame
    pub fn declare<T: AsRef<str>>(&mut self, name: T) {
        self.current().names.insert(name.as_ref().to_string());
    }

    /// Whether a name is known in the current frame or any ancestor
    pub fn is_known(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|f| f.names.contains(name))
    }

    /// True if any of the names is new, i.e. unknown in every frame.
    /// New names are declared in the current frame only.
    pub fn classify_assignment_targets<'n, I>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut any_new = false;
        for name in names {
            if !self.is_known(name) {
                self.declare(name);
                any_new = true;
            }
        }
        any_new
    }

    /// Bind `alias` to an imported module
    pub fn bind_import<A: AsRef<str>, P: AsRef<str>>(&mut self, alias: A, path: P) {
        self.imports
            .insert(alias.as_ref().to_string(), path.as_ref().to_string());
    }

    /// Import path bound to `alias`, unless shadowed by a declared name
    pub fn import_path(&self, alias: &str) -> Option<&str> {
        if self.is_known(alias) {
            return None;
        }
        self.imports.get(alias).map(|s| s.as_str())
    }

    /// Bind `local` to `name` in the module at `path`
    pub fn bind_from_import(&mut self, local: &str, path: &str, name: &str) {
        self.from_imports
            .insert(local.to_string(), (path.to_string(), name.to_string()));
    }

    /// Qualified target of a from-import, unless shadowed
    pub fn from_import(&self, local: &str) -> Option<(&str, &str)> {
        if self.is_known(local) {
            return None;
        }
        self.from_imports
            .get(local)
            .map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Buffer a method fragment in the current frame
    pub fn add_method(&mut self, method: Code) {
        self.current().pending_methods.push(method);
    }

    /// Take the methods that reached the module frame
    pub fn take_root_methods(&mut self) -> Vec<Code> {
        std::mem::take(&mut self.frames[0].pending_methods)
    }
}

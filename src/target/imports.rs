//! Registry of imported packages discovered while rendering.
use indexmap::IndexMap;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashSet;

/// Assigns a local package name to each import path on first
/// reference.
///
/// The local name is the last path segment; a clash with a different
/// path already registered gets a numeric suffix. Rendering borrows the
/// registry immutably, hence the interior mutability.
#[derive(Debug, Default)]
pub struct ImportRegistry {
    paths: RefCell<IndexMap<String, String>>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Local name for the package at `path`, registering it if new
    pub fn local_name(&self, path: &str) -> String {
        if let Some(name) = self.paths.borrow().get(path) {
            return name.clone();
        }

        let base = default_name(path);
        let mut paths = self.paths.borrow_mut();
        let taken: HashSet<String> = paths.values().cloned().collect();
        let mut name = base.clone();
        let mut n = 2;
        while taken.contains(&name) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        paths.insert(path.to_string(), name.clone());
        name
    }

    pub fn is_empty(&self) -> bool {
        self.paths.borrow().is_empty()
    }

    /// Registered imports as `(path, local name)`, sorted by path
    pub fn imports(&self) -> Vec<(String, String)> {
        let mut imports: Vec<(String, String)> = self
            .paths
            .borrow()
            .iter()
            .map(|(p, n)| (p.clone(), n.clone()))
            .collect();
        imports.sort();
        imports
    }
}

lazy_static! {
    /// Characters not allowed in a package name
    static ref NOT_IDENT: Regex = Regex::new(r"[^\p{L}\p{N}_]").unwrap();
}

/// The name a package is referred to by when not renamed
pub fn default_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let name = NOT_IDENT.replace_all(last, "_");
    match name.chars().next() {
        None => "pkg".to_string(),
        Some(c) if c.is_numeric() => format!("p{}", name),
        Some(_) => name.into_owned(),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_local_names() {
        let registry = ImportRegistry::new();
        assert_eq!(registry.local_name("os"), "os");
        assert_eq!(registry.local_name("pygo/runtime"), "runtime");
        assert_eq!(registry.local_name("runtime"), "runtime2");
        assert_eq!(registry.local_name("pygo/runtime"), "runtime");
        assert_eq!(registry.local_name("golang.org/x/go-lib"), "go_lib");
    }

    #[test]
    pub fn test_default_names() {
        assert_eq!(default_name("a/b/my-mod"), "my_mod");
        assert_eq!(default_name("001_basics"), "p001_basics");
        assert_eq!(default_name(""), "pkg");
    }

    #[test]
    pub fn test_sorted_imports() {
        let registry = ImportRegistry::new();
        registry.local_name("strings");
        registry.local_name("fmt");
        assert_eq!(
            registry.imports(),
            vec![
                ("fmt".to_string(), "fmt".to_string()),
                ("strings".to_string(), "strings".to_string())
            ]
        );
    }
}

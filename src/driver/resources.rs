//! Provide access to resources baked into the executable.
use std::collections::HashMap;

/// Name of the runtime support package source
pub const RUNTIME: &str = "runtime";

/// A holder for resources included at compile time
pub struct Resources {
    content: HashMap<String, &'static str>,
}

impl Default for Resources {
    fn default() -> Self {
        let mut content = HashMap::new();
        content.insert(RUNTIME.to_string(), include_str!("../../resources/runtime.go"));
        Resources { content }
    }
}

impl Resources {
    /// Retrieve the resource identified by `name`, None if it doesn't
    /// exist.
    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&'static str> {
        self.content.get(name.as_ref()).copied()
    }
}

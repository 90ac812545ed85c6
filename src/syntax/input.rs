//! An input descriptor: where a serialised module AST is read from and
//! the module name it is translated under.
use crate::syntax::ast::Module;
use crate::syntax::error::InputError;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Sources from which a module AST can be read.
#[derive(PartialEq, Debug, Clone, Eq, Hash, PartialOrd, Ord)]
pub enum Locator {
    /// Filesystem path
    Fs(PathBuf),
    /// Input from stdin
    StdIn,
}

impl From<&str> for Locator {
    fn from(s: &str) -> Locator {
        if s == "-" {
            Locator::StdIn
        } else {
            Locator::Fs(PathBuf::from(s))
        }
    }
}

impl From<&Path> for Locator {
    fn from(p: &Path) -> Self {
        Locator::Fs(p.to_path_buf())
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Fs(path) => write!(f, "{}", path.display()),
            Locator::StdIn => write!(f, "-"),
        }
    }
}

/// A locator together with the name of the module it holds
#[derive(PartialEq, Debug, Clone, Eq, Hash)]
pub struct Input {
    locator: Locator,
    name: String,
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.locator)
    }
}

impl Input {
    pub fn new(locator: Locator, name: &str) -> Self {
        Input {
            locator,
            name: name.to_string(),
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Module name, used in the generated file header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read and deserialise the module AST
    pub fn load(&self) -> Result<Module, InputError> {
        let source = self.locator.to_string();
        let mut text = String::new();
        match &self.locator {
            Locator::Fs(path) => {
                let file = File::open(path).map_err(|e| InputError::Io(source.clone(), e))?;
                BufReader::new(file)
                    .read_to_string(&mut text)
                    .map_err(|e| InputError::Io(source.clone(), e))?;
            }
            Locator::StdIn => {
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| InputError::Io(source.clone(), e))?;
            }
        }
        parse_module(&text).map_err(|e| InputError::InvalidAst(source, e))
    }
}

/// Deserialise a module from JSON text
pub fn parse_module(text: &str) -> Result<Module, serde_json::Error> {
    serde_json::from_str(text)
}

impl From<Locator> for Input {
    fn from(locator: Locator) -> Self {
        let name = match &locator {
            Locator::Fs(path) => module_name(path),
            Locator::StdIn => "stdin".to_string(),
        };
        Input { locator, name }
    }
}

impl FromStr for Input {
    type Err = InputError;

    /// Parse `[name=]path`, defaulting the name from the file stem
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !name.is_empty() => {
                Ok(Input::new(Locator::from(path), name))
            }
            _ => Ok(Input::from(Locator::from(s))),
        }
    }
}

/// Derive a module name from the file stem, ignoring any `.ast`
/// infix (`foo.ast.json` is module `foo`)
fn module_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string());
    match stem.strip_suffix(".ast") {
        Some(s) => s.to_string(),
        None => stem,
    }
}

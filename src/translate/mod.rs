//! Translation of a source module AST into target code fragments.
//!
//! The translation is a depth-first, syntax-directed walk. Each module
//! gets a fresh `Translator` (and so a fresh scope chain and temporary
//! name counter), which keeps the output a pure function of the input
//! tree and the settings.
pub mod call;
pub mod class;
pub mod comprehension;
pub mod control;
pub mod error;
pub mod expr;
pub mod scope;
pub mod stmt;
pub mod tables;
pub mod translator;
pub mod unknown;

use crate::syntax::ast::Module;
use crate::target::code::Code;
use std::fmt;
use std::str::FromStr;
use structopt::StructOpt;

pub use self::error::TranslateError;
pub use self::translator::Translator;

/// Import path of the bundled runtime support package
pub const DEFAULT_RUNTIME_PATH: &str = "pygo/runtime";

/// How routines containing `yield` are handled
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorPolicy {
    /// Each `yield` returns its value; the routine runs once
    SingleShot,
    /// Any `yield` is a fatal error
    Reject,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        GeneratorPolicy::SingleShot
    }
}

impl FromStr for GeneratorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-shot" => Ok(GeneratorPolicy::SingleShot),
            "reject" => Ok(GeneratorPolicy::Reject),
            _ => Err(format!("unknown generator policy {}", s)),
        }
    }
}

impl fmt::Display for GeneratorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleShot => write!(f, "single-shot"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Settings controlling translation
#[derive(StructOpt, Debug, Clone)]
pub struct TranslateSettings {
    /// Abort on the first construct without a mapping rule
    #[structopt(long)]
    pub strict: bool,
    /// Treatment of generator functions (single-shot, reject)
    #[structopt(long, default_value)]
    pub generator_policy: GeneratorPolicy,
    /// Precede each statement with a comment giving its source line
    #[structopt(long = "lines")]
    pub line_comments: bool,
    /// Import path of the runtime support package
    #[structopt(long, default_value = "pygo/runtime")]
    pub runtime_path: String,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        TranslateSettings {
            strict: false,
            generator_policy: GeneratorPolicy::default(),
            line_comments: false,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl TranslateSettings {
    /// Default settings in strict mode
    pub fn strict() -> Self {
        TranslateSettings {
            strict: true,
            ..Default::default()
        }
    }
}

/// Translate a module into its ordered fragment sequence
pub fn translate(module: &Module, settings: &TranslateSettings) -> Result<Vec<Code>, TranslateError> {
    Translator::new(settings).module(module)
}

/// Translate a module and render it with default layout, for tests
#[cfg(test)]
pub fn render_module(module: &Module, settings: &TranslateSettings) -> Result<String, TranslateError> {
    let fragments = translate(module, settings)?;
    Ok(fragments
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_policy_parsing() {
        assert_eq!(
            "reject".parse::<GeneratorPolicy>(),
            Ok(GeneratorPolicy::Reject)
        );
        assert!("lazy".parse::<GeneratorPolicy>().is_err());
        assert_eq!(GeneratorPolicy::default().to_string(), "single-shot");
    }

    #[test]
    pub fn test_settings_from_args() {
        let settings =
            TranslateSettings::from_iter(vec!["pygo", "--strict", "--generator-policy", "reject"]);
        assert!(settings.strict);
        assert_eq!(settings.generator_policy, GeneratorPolicy::Reject);
        assert_eq!(settings.runtime_path, DEFAULT_RUNTIME_PATH);
    }
}

//! Command line argument handling
use crate::syntax::input::Input;
use crate::target::imports::default_name;
use crate::translate::TranslateSettings;
use std::path::PathBuf;
use structopt::StructOpt;

/// Entry-point function name for executable packages
pub const ENTRY_POINT: &str = "main";

/// pygo - translate Python module ASTs into Go source
#[derive(StructOpt, Debug, Clone)]
#[structopt(name = "pygo")]
pub struct PygoOptions {
    /// Log level: 0 warn, 1 info, 2 debug, 3 or more trace
    #[structopt(short = "d", long = "debug", default_value = "0")]
    pub debug: u8,

    /// Trace everything the translator does
    #[structopt(long)]
    pub verbose: bool,

    #[structopt(flatten)]
    pub translate: TranslateSettings,

    /// Emit an executable `main` package, moving top-level
    /// statements into `func main()`
    #[structopt(long)]
    pub main: bool,

    /// Package name (defaults to the module name)
    #[structopt(long)]
    pub package: Option<String>,

    /// Line width for layout
    #[structopt(long, default_value = "100")]
    pub width: usize,

    /// Output file, or directory when translating several inputs
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Write the runtime support package source to this path
    #[structopt(long = "emit-runtime", parse(from_os_str))]
    pub emit_runtime: Option<PathBuf>,

    /// Print timings to stderr before exiting
    #[structopt(short = "S", long = "statistics")]
    pub statistics: bool,

    /// JSON module ASTs to translate (`[name=]path`, `-` for stdin)
    #[structopt(name = "FILES")]
    pub files: Vec<Input>,
}

impl PygoOptions {
    /// Package clause for the module translated from `input`
    pub fn package_for(&self, input: &Input) -> String {
        if self.main {
            ENTRY_POINT.to_string()
        } else if let Some(package) = &self.package {
            package.clone()
        } else {
            default_name(input.name())
        }
    }

    /// Entry point to gather top-level statements into, if any
    pub fn entry_point(&self) -> Option<&str> {
        if self.main {
            Some(ENTRY_POINT)
        } else {
            None
        }
    }

    /// Filter directive for the tracing subscriber
    pub fn log_filter(&self) -> String {
        let level = match self.debug {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        if self.verbose {
            format!("{},pygo=trace", level)
        } else {
            level.to_string()
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_defaults() {
        let opts = PygoOptions::from_iter(vec!["pygo", "demo.ast.json"]);
        assert_eq!(opts.files.len(), 1);
        assert_eq!(opts.package_for(&opts.files[0]), "demo");
        assert_eq!(opts.entry_point(), None);
        assert_eq!(opts.width, 100);
        assert!(!opts.translate.strict);
        assert_eq!(opts.log_filter(), "warn");
    }

    #[test]
    pub fn test_flags() {
        let opts = PygoOptions::from_iter(vec![
            "pygo", "--main", "--strict", "--lines", "-d", "2", "--verbose", "-o", "out.go", "a.json",
        ]);
        assert!(opts.translate.strict);
        assert!(opts.translate.line_comments);
        assert_eq!(opts.package_for(&opts.files[0]), "main");
        assert_eq!(opts.entry_point(), Some("main"));
        assert_eq!(opts.log_filter(), "debug,pygo=trace");
        assert_eq!(opts.output, Some(PathBuf::from("out.go")));
    }

    #[test]
    pub fn test_explicit_package() {
        let opts = PygoOptions::from_iter(vec!["pygo", "--package", "util", "my-mod=x.json"]);
        assert_eq!(opts.package_for(&opts.files[0]), "util");
        let opts = PygoOptions::from_iter(vec!["pygo", "my-mod=x.json"]);
        assert_eq!(opts.package_for(&opts.files[0]), "my_mod");
    }
}

//! Overall high-level error type for pygo
use crate::syntax::error::InputError;
use crate::translate::TranslateError;
use codespan_reporting::diagnostic::Diagnostic;
use std::fmt::Display;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PygoError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("in {0}: {1}")]
    InModule(String, Box<PygoError>),
    #[error("no input files")]
    NoInputs,
}

fn default_diagnostic<E>(e: &E) -> Diagnostic<usize>
where
    E: Display,
{
    Diagnostic::error().with_message(format!("{}", e))
}

impl PygoError {
    /// Attribute the error to the named module
    pub fn in_module<T: AsRef<str>>(self, name: T) -> Self {
        PygoError::InModule(name.as_ref().to_string(), Box::new(self))
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        match self {
            PygoError::Input(e) => e.to_diagnostic(),
            PygoError::Translate(e) => e.to_diagnostic(),
            PygoError::InModule(name, e) => {
                let diag = e.to_diagnostic();
                let message = format!("{}: {}", name, diag.message);
                diag.with_message(message)
            }
            e => default_diagnostic(e),
        }
    }
}

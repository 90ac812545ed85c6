use codespan_reporting::diagnostic::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors reading a serialised AST
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {0}: {1}")]
    Io(String, io::Error),
    #[error("{0} is not a valid module AST: {1}")]
    InvalidAst(String, serde_json::Error),
}

impl InputError {
    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        match self {
            InputError::Io(..) => Diagnostic::error().with_message(format!("IO Error: {}", self)),
            InputError::InvalidAst(_, e) => Diagnostic::error()
                .with_message(format!("{}", self))
                .with_notes(vec![format!("at line {}, column {} of the JSON", e.line(), e.column())]),
        }
    }
}

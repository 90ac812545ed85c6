//! Fatal translation errors
use crate::common::pos::{HasPos, Pos};
use codespan_reporting::diagnostic::Diagnostic;
use thiserror::Error;

/// Constructs for which no fragment can be emitted without
/// misrepresenting the source, plus unknown constructs in strict mode.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
pub enum TranslateError {
    #[error("{0}")]
    Unknown(String, Pos),
    #[error("slices with a step are not supported")]
    SteppedSlice(Pos),
    #[error("extended (multi-dimensional) slices are not supported")]
    ExtendedSlice(Pos),
    #[error("only subscripted elements can be deleted, found {0}")]
    InvalidDeleteTarget(&'static str, Pos),
    #[error("unexpected {0} statement in class {1}")]
    UnexpectedClassStatement(&'static str, String, Pos),
    #[error("range expects 1 to 3 arguments, found {0}")]
    RangeArity(usize, Pos),
    #[error("asynchronous comprehensions are not supported")]
    AsyncComprehension(Pos),
    #[error("generator functions are rejected by the current generator policy")]
    GeneratorRejected(Pos),
}

impl HasPos for TranslateError {
    fn pos(&self) -> Pos {
        use self::TranslateError::*;

        match *self {
            Unknown(_, p) => p,
            SteppedSlice(p) => p,
            ExtendedSlice(p) => p,
            InvalidDeleteTarget(_, p) => p,
            UnexpectedClassStatement(_, _, p) => p,
            RangeArity(_, p) => p,
            AsyncComprehension(p) => p,
            GeneratorRejected(p) => p,
        }
    }
}

impl TranslateError {
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let pos = self.pos();
        let diag = Diagnostic::error().with_message(format!("{}", self));
        if pos.is_valid() {
            diag.with_notes(vec![format!("at {}", pos)])
        } else {
            diag
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_diagnostic_notes() {
        let err = TranslateError::SteppedSlice(Pos::new(4, 8));
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "slices with a step are not supported");
        assert_eq!(diag.notes, vec!["at line 4, col 8".to_string()]);

        let err = TranslateError::RangeArity(4, Pos::default());
        assert!(err.to_diagnostic().notes.is_empty());
    }
}

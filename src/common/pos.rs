//! Source positions carried by AST nodes for diagnostics
use serde::Deserialize;
use std::fmt::{self, Display};

/// A line / column position in the source text.
///
/// Lines are 1-based as reported by the external parser; a line of
/// zero marks a synthetic node with no source location.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Pos {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub col: u32,
}

impl Pos {
    pub fn new(line: u32, col: u32) -> Self {
        Pos { line, col }
    }

    /// The default position is invalid.
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "line {}, col {}", self.line, self.col)
        } else {
            write!(f, "unknown position")
        }
    }
}

/// Anything that has a source position.
pub trait HasPos {
    fn pos(&self) -> Pos;
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_display() {
        assert_eq!(format!("{}", Pos::new(3, 4)), "line 3, col 4");
        assert_eq!(format!("{}", Pos::default()), "unknown position");
    }
}

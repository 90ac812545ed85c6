//! Fallback for constructs without a mapping rule.
//!
//! In lenient mode the diagnostic text is emitted in place of the
//! construct (a string literal in expression position, a comment in
//! statement position) and translation continues. In strict mode the
//! first such construct aborts the translation.
use crate::common::pos::{HasPos, Pos};
use crate::syntax::ast::{Expr, Stmt};
use crate::target::code::Code;
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::translator::Translator;
use std::fmt::Debug;
use tracing::warn;

/// A node that can be reported as unknown
pub trait Describe: Debug + HasPos {
    /// Dynamic type tag of the node
    fn kind_name(&self) -> &'static str;
}

impl Describe for Expr {
    fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }
}

impl Describe for Stmt {
    fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }
}

/// Diagnostic text for an unknown construct: the context label, the
/// node's type tag, its dump and, when known, its position.
pub fn describe<N: Describe>(label: &str, node: &N) -> String {
    let mut msg = format!("UNKNOWN-{}: {} {:?}", label, node.kind_name(), node);
    let pos: Pos = node.pos();
    if pos.is_valid() {
        msg.push_str(&format!(" at line {}, col {}", pos.line, pos.col));
    }
    msg
}

impl<'s> Translator<'s> {
    fn unknown<N: Describe>(&self, label: &str, node: &N) -> Result<String, TranslateError> {
        let msg = describe(label, node);
        if self.settings.strict {
            return Err(TranslateError::Unknown(msg, node.pos()));
        }
        warn!(kind = node.kind_name(), pos = %node.pos(), "no mapping rule, emitting diagnostic");
        Ok(msg)
    }

    /// Unknown construct in expression position
    pub fn unknown_expr<N: Describe>(&self, label: &str, node: &N) -> Result<Code, TranslateError> {
        self.unknown(label, node).map(go::string)
    }

    /// Unknown construct in statement position
    pub fn unknown_stmt<N: Describe>(&self, label: &str, node: &N) -> Result<Code, TranslateError> {
        self.unknown(label, node).map(go::comment)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::syntax::ast::ExprKind;
    use crate::syntax::make::*;
    use crate::translate::TranslateSettings;

    #[test]
    pub fn test_lenient_fallback_carries_tag_and_position() {
        let settings = TranslateSettings::default();
        let t = Translator::new(&settings);
        let node = Expr::new(ExprKind::Ellipsis).at(12, 3);
        let code = t.unknown_expr("EXPR", &node).unwrap();
        let text = code.to_string();
        assert!(text.starts_with("\"UNKNOWN-EXPR: ast.Ellipsis"));
        assert!(text.contains("at line 12, col 3"));
    }

    #[test]
    pub fn test_statement_fallback_is_comment() {
        let settings = TranslateSettings::default();
        let t = Translator::new(&settings);
        let code = t.unknown_stmt("STMT", &global(&["x"])).unwrap();
        assert!(code.to_string().starts_with("// UNKNOWN-STMT: ast.Global"));
    }

    #[test]
    pub fn test_strict_mode_aborts() {
        let settings = TranslateSettings::strict();
        let t = Translator::new(&settings);
        let node = Expr::new(ExprKind::Ellipsis).at(2, 0);
        match t.unknown_expr("EXPR", &node) {
            Err(TranslateError::Unknown(msg, pos)) => {
                assert!(msg.contains("ast.Ellipsis"));
                assert_eq!(pos, Pos::new(2, 0));
            }
            other => panic!("expected abort, got {:?}", other),
        }
    }
}

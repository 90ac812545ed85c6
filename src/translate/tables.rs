//! Mapping tables from source operators and names to target tokens.
use crate::syntax::ast::{BinOp, BoolOp, CmpOp, UnaryOp};
use std::collections::{HashMap, HashSet};

lazy_static! {
    /// Reserved words of the target language
    static ref GO_KEYWORDS: HashSet<&'static str> = [
        "break", "case", "chan", "const", "continue", "default", "defer", "else",
        "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
        "map", "package", "range", "return", "select", "struct", "switch", "type",
        "var",
    ]
    .iter()
    .cloned()
    .collect();

    /// Names taken by the runtime support package
    static ref RUNTIME_NAMES: HashSet<&'static str> =
        ["Any", "Dict", "List", "Tuple"].iter().cloned().collect();

    /// Builtin type names with a target equivalent
    static ref TYPE_NAMES: HashMap<&'static str, Renamed> = {
        let mut m = HashMap::new();
        m.insert("str", Renamed::Ident("string".to_string()));
        m.insert("float", Renamed::Ident("float64".to_string()));
        m.insert("complex", Renamed::Ident("complex128".to_string()));
        m.insert("dict", Renamed::Runtime("Dict"));
        m.insert("list", Renamed::Runtime("List"));
        m.insert("tuple", Renamed::Runtime("Tuple"));
        m.insert("object", Renamed::Runtime("Any"));
        m
    };
}

/// Result of renaming a referenced name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renamed {
    /// A plain target identifier
    Ident(String),
    /// A type exported by the runtime support package
    Runtime(&'static str),
}

/// Rename a name in reference position, mapping builtin types
pub fn rename(name: &str) -> Renamed {
    match TYPE_NAMES.get(name) {
        Some(renamed) => renamed.clone(),
        None => Renamed::Ident(ident(name)),
    }
}

/// Identifier safe to declare in the target language
pub fn ident(name: &str) -> String {
    if GO_KEYWORDS.contains(name) || RUNTIME_NAMES.contains(name) {
        format!("{}Π", name)
    } else {
        name.to_string()
    }
}

/// Binary operator token; `None` where the target has no operator
pub fn binary_op(op: BinOp) -> Option<&'static str> {
    use self::BinOp::*;

    match op {
        Add => Some("+"),
        Sub => Some("-"),
        Mult => Some("*"),
        Div => Some("/"),
        Mod => Some("%"),
        LShift => Some("<<"),
        RShift => Some(">>"),
        BitOr => Some("|"),
        BitXor => Some("^"),
        BitAnd => Some("&"),
        Pow | FloorDiv | MatMult => None,
    }
}

/// Compound assignment token for an augmented assignment
pub fn aug_op(op: BinOp) -> Option<&'static str> {
    use self::BinOp::*;

    match op {
        Add => Some("+="),
        Sub => Some("-="),
        Mult => Some("*="),
        Div => Some("/="),
        Mod => Some("%="),
        LShift => Some("<<="),
        RShift => Some(">>="),
        BitOr => Some("|="),
        BitXor => Some("^="),
        BitAnd => Some("&="),
        Pow | FloorDiv | MatMult => None,
    }
}

/// Prefix operator token; bitwise complement has none
pub fn unary_op(op: UnaryOp) -> Option<&'static str> {
    match op {
        UnaryOp::Not => Some("!"),
        UnaryOp::UAdd => Some("+"),
        UnaryOp::USub => Some("-"),
        UnaryOp::Invert => None,
    }
}

pub fn bool_op(op: BoolOp) -> &'static str {
    match op {
        BoolOp::And => "&&",
        BoolOp::Or => "||",
    }
}

/// Comparison token; membership tests have none
pub fn cmp_op(op: CmpOp) -> Option<&'static str> {
    use self::CmpOp::*;

    match op {
        Eq | Is => Some("=="),
        NotEq | IsNot => Some("!="),
        Lt => Some("<"),
        LtE => Some("<="),
        Gt => Some(">"),
        GtE => Some(">="),
        In | NotIn => None,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_rename() {
        assert_eq!(rename("str"), Renamed::Ident("string".to_string()));
        assert_eq!(rename("dict"), Renamed::Runtime("Dict"));
        assert_eq!(rename("func"), Renamed::Ident("funcΠ".to_string()));
        assert_eq!(rename("List"), Renamed::Ident("ListΠ".to_string()));
        assert_eq!(rename("count"), Renamed::Ident("count".to_string()));
    }

    #[test]
    pub fn test_operators() {
        assert_eq!(binary_op(BinOp::Add), Some("+"));
        assert_eq!(binary_op(BinOp::Pow), None);
        assert_eq!(aug_op(BinOp::BitXor), Some("^="));
        assert_eq!(unary_op(UnaryOp::Invert), None);
        assert_eq!(cmp_op(CmpOp::IsNot), Some("!="));
        assert_eq!(cmp_op(CmpOp::In), None);
        assert_eq!(bool_op(BoolOp::Or), "||");
    }
}

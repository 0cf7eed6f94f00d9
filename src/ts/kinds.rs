//! Closed classification of the Go syntax nodes the motion indices care about.
//!
//! Every extractor dispatches on [`Construct`] instead of matching raw
//! tree-sitter kind strings, so the set of brace-delimited constructs lives in
//! one place.

use crate::ts::parser::{child_of_kind, last_child_of_kind};
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    For,
    Range,
    If,
    Switch,
    TypeSwitch,
    Select,
    FuncDecl,
    MethodDecl,
    FuncLit,
    TypeSpec,
    TypeAlias,
}

impl Construct {
    pub fn of(node: Node<'_>) -> Option<Self> {
        let construct = match node.kind() {
            "for_statement" => {
                if child_of_kind(node, "range_clause").is_some() {
                    Construct::Range
                } else {
                    Construct::For
                }
            }
            "if_statement" => Construct::If,
            "expression_switch_statement" => Construct::Switch,
            "type_switch_statement" => Construct::TypeSwitch,
            "select_statement" => Construct::Select,
            "function_declaration" => Construct::FuncDecl,
            "method_declaration" => Construct::MethodDecl,
            "func_literal" => Construct::FuncLit,
            "type_spec" => Construct::TypeSpec,
            "type_alias" => Construct::TypeAlias,
            _ => return None,
        };
        Some(construct)
    }

    pub fn is_func(self) -> bool {
        matches!(
            self,
            Construct::FuncDecl | Construct::MethodDecl | Construct::FuncLit
        )
    }

    /// Keyword token that introduces the construct.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Construct::For | Construct::Range => Some("for"),
            Construct::If => Some("if"),
            Construct::Switch | Construct::TypeSwitch => Some("switch"),
            Construct::Select => Some("select"),
            Construct::FuncDecl | Construct::MethodDecl | Construct::FuncLit => Some("func"),
            Construct::TypeSpec | Construct::TypeAlias => None,
        }
    }

    /// The keyword node, falling back to the construct node itself.
    pub fn keyword_node(self, node: Node<'_>) -> Node<'_> {
        self.keyword()
            .and_then(|kw| child_of_kind(node, kw))
            .unwrap_or(node)
    }

    /// Opening and closing brace tokens of the construct's body, if it has one.
    ///
    /// Loops, `if` and functions carry a `block` body; switch and select
    /// statements hold their braces directly. A brace recovered as MISSING by
    /// the parser does not count.
    pub fn body_braces(self, node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
        let body = match self {
            Construct::For
            | Construct::Range
            | Construct::FuncDecl
            | Construct::MethodDecl
            | Construct::FuncLit => node.child_by_field_name("body")?,
            Construct::If => node.child_by_field_name("consequence")?,
            Construct::Switch | Construct::TypeSwitch | Construct::Select => node,
            Construct::TypeSpec | Construct::TypeAlias => return None,
        };
        let lbrace = child_of_kind(body, "{")?;
        let rbrace = last_child_of_kind(body, "}")?;
        if lbrace.is_missing() || rbrace.is_missing() {
            return None;
        }
        Some((lbrace, rbrace))
    }
}

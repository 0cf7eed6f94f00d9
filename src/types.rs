//! Named type declarations.

use crate::position::Position;
use crate::ts::comments::Comments;
use crate::ts::kinds::Construct;
use crate::ts::parser::{child_of_kind, preorder};
use crate::ts::render::Renderer;
use serde::Serialize;
use tree_sitter::Node;

/// Column of the name in an unindented `type Name ...` declaration.
pub const TOP_LEVEL_TYPE_COLUMN: usize = 6;

/// Simplified representation of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeSignature {
    /// Full signature representation, e.g. `type MyInt int`
    pub full: String,

    /// Name of the declared type
    pub name: String,

    /// Rendered underlying type. For `type MyInt int` this is `int`.
    #[serde(rename = "type")]
    pub underlying: String,
}

/// A type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Type {
    #[serde(rename = "sig")]
    pub signature: TypeSignature,

    /// Position of the declared name
    #[serde(rename = "type")]
    pub type_pos: Position,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Position>,
}

impl TypeSignature {
    fn render(r: &Renderer<'_>, spec: Node<'_>, alias: bool) -> Self {
        let name = spec
            .child_by_field_name("name")
            .map(|n| r.text(n).to_string())
            .unwrap_or_default();
        let type_params = spec
            .child_by_field_name("type_parameters")
            .map(|list| r.type_params(list))
            .unwrap_or_default();
        let underlying = spec
            .child_by_field_name("type")
            .map(|ty| r.expr(ty))
            .unwrap_or_default();
        let assign = if alias { " =" } else { "" };

        TypeSignature {
            full: format!("type {}{}{} {}", name, type_params, assign, underlying),
            name,
            underlying,
        }
    }
}

/// Type declarations in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Types(Vec<Type>);

impl Types {
    pub fn collect(filename: &str, source: &str, root: Node<'_>, comments: &Comments) -> Self {
        let renderer = Renderer::new(source);
        let types = preorder(root)
            .filter_map(|node| {
                let construct = Construct::of(node)?;
                let alias = match construct {
                    Construct::TypeSpec => false,
                    Construct::TypeAlias => true,
                    _ => return None,
                };
                let name = node.child_by_field_name("name")?;
                Some(Type {
                    signature: TypeSignature::render(&renderer, node, alias),
                    type_pos: Position::start_of(filename, name),
                    doc: doc_token(node).and_then(|start| comments.doc_for(start).cloned()),
                })
            })
            .collect();
        Types(types)
    }

    pub fn as_slice(&self) -> &[Type] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Type> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy holding only top level type declarations.
    ///
    /// This is a formatting heuristic, not scope analysis: a declaration
    /// counts as top level when its name sits at [`TOP_LEVEL_TYPE_COLUMN`],
    /// as `gofmt` lays out `type Name ...` at the start of a line. Specs in
    /// a parenthesized group and indented local declarations are dropped.
    pub fn top_level(&self) -> Types {
        Types(
            self.0
                .iter()
                .filter(|t| t.type_pos.column == TOP_LEVEL_TYPE_COLUMN)
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<Type>> for Types {
    fn from(types: Vec<Type>) -> Self {
        Types(types)
    }
}

impl<'a> IntoIterator for &'a Types {
    type Item = &'a Type;
    type IntoIter = std::slice::Iter<'a, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Start byte of the token a spec's doc comment is attached to: the spec
/// itself inside `type ( ... )`, otherwise the `type` keyword.
fn doc_token(spec: Node<'_>) -> Option<usize> {
    let decl = spec.parent()?;
    if child_of_kind(decl, "(").is_some() {
        Some(spec.start_byte())
    } else {
        Some(decl.start_byte())
    }
}

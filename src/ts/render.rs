//! Canonical text rendering of Go type expressions and field lists.
//!
//! Output follows the shape `go/types.WriteExpr` produces: no source
//! whitespace, struct tags dropped, struct and interface members joined by
//! `"; "`.

use crate::ts::parser::{child_of_kind, named_children};
use tree_sitter::Node;

/// A rendered parameter, result, receiver or type parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList {
    /// Groups joined by `", "`, without the surrounding delimiters.
    pub text: String,
    /// Number of declared groups (`a, b int` is one group).
    pub fields: usize,
    /// Whether any group declares names.
    pub named: bool,
}

/// Renders nodes of a single source file.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    source: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn text(&self, node: Node<'_>) -> &'a str {
        &self.source[node.byte_range()]
    }

    fn collapsed(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn names(&self, node: Node<'_>) -> Vec<&'a str> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.text(n))
            .collect();
        names
    }

    fn field_expr(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.expr(n))
            .unwrap_or_default()
    }

    fn first_named_expr(&self, node: Node<'_>) -> String {
        named_children(node)
            .first()
            .map(|n| self.expr(*n))
            .unwrap_or_default()
    }

    /// Render a type expression.
    pub fn expr(&self, node: Node<'_>) -> String {
        match node.kind() {
            "type_identifier" | "identifier" | "field_identifier" | "package_identifier" => {
                self.text(node).to_string()
            }
            "qualified_type" => format!(
                "{}.{}",
                self.field_expr(node, "package"),
                self.field_expr(node, "name")
            ),
            "pointer_type" => format!("*{}", self.first_named_expr(node)),
            "slice_type" => format!("[]{}", self.field_expr(node, "element")),
            "array_type" => {
                let length = node
                    .child_by_field_name("length")
                    .map(|n| self.collapsed(n))
                    .unwrap_or_default();
                format!("[{}]{}", length, self.field_expr(node, "element"))
            }
            "implicit_length_array_type" => format!("[...]{}", self.field_expr(node, "element")),
            "map_type" => format!(
                "map[{}]{}",
                self.field_expr(node, "key"),
                self.field_expr(node, "value")
            ),
            "channel_type" => self.channel(node),
            "function_type" => format!("func{}", self.signature(node)),
            "struct_type" => self.struct_type(node),
            "interface_type" => self.interface_type(node),
            "generic_type" => {
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|list| {
                        named_children(list)
                            .into_iter()
                            .map(|arg| self.expr(arg))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                format!("{}[{}]", self.field_expr(node, "type"), args)
            }
            "type_elem" | "type_constraint" | "constraint_elem" | "constraint_term" => {
                named_children(node)
                    .into_iter()
                    .map(|term| self.expr(term))
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
            "negated_type" => format!("~{}", self.first_named_expr(node)),
            "parenthesized_type" => format!("({})", self.first_named_expr(node)),
            _ => self.collapsed(node),
        }
    }

    fn channel(&self, node: Node<'_>) -> String {
        let value = node.child_by_field_name("value");
        let mut cursor = node.walk();
        let arrows: Vec<&str> = node
            .children(&mut cursor)
            .take_while(|c| Some(*c) != value)
            .map(|c| c.kind())
            .collect();
        let prefix = match arrows.as_slice() {
            ["<-", ..] => "<-chan ",
            [_, "<-", ..] => "chan<- ",
            _ => "chan ",
        };
        format!("{}{}", prefix, value.map(|v| self.expr(v)).unwrap_or_default())
    }

    /// `(params) results` for function types and interface methods.
    ///
    /// A single unnamed result renders bare, anything else in parentheses.
    fn signature(&self, node: Node<'_>) -> String {
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.field_list(p))
            .unwrap_or_default();
        let mut out = format!("({})", params.text);

        if let Some(result) = node.child_by_field_name("result") {
            if result.kind() == "parameter_list" {
                let results = self.field_list(result);
                if results.fields == 1 && !results.named {
                    out.push(' ');
                    out.push_str(&results.text);
                } else if results.fields > 0 {
                    out.push_str(&format!(" ({})", results.text));
                }
            } else {
                out.push(' ');
                out.push_str(&self.expr(result));
            }
        }
        out
    }

    fn struct_type(&self, node: Node<'_>) -> String {
        let Some(list) = child_of_kind(node, "field_declaration_list") else {
            return "struct{}".to_string();
        };
        let fields: Vec<String> = named_children(list)
            .into_iter()
            .filter(|f| f.kind() == "field_declaration")
            .map(|field| {
                let names = self.names(field);
                let ty = self.field_expr(field, "type");
                if !names.is_empty() {
                    format!("{} {}", names.join(", "), ty)
                } else if child_of_kind(field, "*").is_some() {
                    format!("*{}", ty)
                } else {
                    ty
                }
            })
            .collect();
        format!("struct{{{}}}", fields.join("; "))
    }

    fn interface_type(&self, node: Node<'_>) -> String {
        let elems: Vec<String> = named_children(node)
            .into_iter()
            .map(|elem| match elem.kind() {
                "method_elem" | "method_spec" => {
                    format!("{}{}", self.field_expr(elem, "name"), self.signature(elem))
                }
                _ => self.expr(elem),
            })
            .collect();
        format!("interface{{{}}}", elems.join("; "))
    }

    /// Render a `parameter_list` (also used for receivers and results).
    ///
    /// Names sharing one type stay grouped: `a, b int, c string`.
    pub fn field_list(&self, list: Node<'_>) -> FieldList {
        let mut groups = Vec::new();
        let mut named = false;

        for param in named_children(list) {
            let names = self.names(param);
            let ty = self.field_expr(param, "type");
            let ty = match param.kind() {
                "variadic_parameter_declaration" => format!("...{}", ty),
                "parameter_declaration" => ty,
                _ => continue,
            };
            if names.is_empty() {
                groups.push(ty);
            } else {
                named = true;
                groups.push(format!("{} {}", names.join(", "), ty));
            }
        }

        FieldList {
            fields: groups.len(),
            text: groups.join(", "),
            named,
        }
    }

    /// Render a `type_parameter_list` as `[T any, K comparable]`.
    pub fn type_params(&self, list: Node<'_>) -> String {
        let groups: Vec<String> = named_children(list)
            .into_iter()
            .filter(|p| p.kind() == "type_parameter_declaration")
            .map(|p| format!("{} {}", self.names(p).join(", "), self.field_expr(p, "type")))
            .collect();
        format!("[{}]", groups.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::parser::{preorder, GoParser};

    /// Render the type of the first `type_spec` in `decl`.
    fn render_type(decl: &str) -> String {
        let source = format!("package p\n\n{}\n", decl);
        let mut parser = GoParser::new().unwrap();
        let parsed = parser.parse_with_source("src.go", &source).unwrap();
        let spec = preorder(parsed.root_node())
            .find(|n| n.kind() == "type_spec")
            .unwrap();
        let ty = spec.child_by_field_name("type").unwrap();
        Renderer::new(&source).expr(ty)
    }

    #[test]
    fn renders_composite_types() {
        assert_eq!(render_type("type A []*pkg.Thing"), "[]*pkg.Thing");
        assert_eq!(render_type("type M map[string] []byte"), "map[string][]byte");
        assert_eq!(render_type("type R [ 4 ]int"), "[4]int");
    }

    #[test]
    fn renders_channel_directions() {
        assert_eq!(render_type("type C chan int"), "chan int");
        assert_eq!(render_type("type S chan<- int"), "chan<- int");
        assert_eq!(render_type("type R <-chan int"), "<-chan int");
    }

    #[test]
    fn renders_struct_without_tags() {
        assert_eq!(
            render_type("type X struct {\n\tname string `json:\"name\"`\n\ta, b int\n\t*Base\n}"),
            "struct{name string; a, b int; *Base}"
        );
        assert_eq!(render_type("type T struct{}"), "struct{}");
    }

    #[test]
    fn renders_interface_members() {
        assert_eq!(
            render_type("type I interface {\n\tio.Reader\n\tClose() error\n\tRead(p []byte) (n int, err error)\n}"),
            "interface{io.Reader; Close() error; Read(p []byte) (n int, err error)}"
        );
    }

    #[test]
    fn renders_function_types() {
        assert_eq!(render_type("type F func(int, string) error"), "func(int, string) error");
        assert_eq!(render_type("type G func(a ...int) (int, error)"), "func(a ...int) (int, error)");
        assert_eq!(render_type("type H func() (err error)"), "func() (err error)");
    }

    #[test]
    fn renders_generics() {
        assert_eq!(render_type("type L List[int]"), "List[int]");
        assert_eq!(render_type("type N interface{ ~int | ~float64 }"), "interface{~int | ~float64}");
    }
}

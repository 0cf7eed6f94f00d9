//! Go functions: declarations, methods and literals.

use crate::error::MotionError;
use crate::position::Position;
use crate::ts::comments::Comments;
use crate::ts::kinds::Construct;
use crate::ts::parser::preorder;
use crate::ts::render::Renderer;
use serde::Serialize;
use std::fmt;
use tree_sitter::Node;

/// Rendered signature of a function. Text only, never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FuncSignature {
    /// Full signature, e.g. `func (s *Server) Serve(l net.Listener) error`
    pub full: String,
    /// Receiver list without parentheses, declarations only
    pub recv: String,
    /// Empty for literals
    pub name: String,
    /// Parameter list without parentheses
    #[serde(rename = "in")]
    pub input: String,
    /// Results as they appear in `full`
    #[serde(rename = "out")]
    pub output: String,
}

impl FuncSignature {
    fn render(r: &Renderer<'_>, node: Node<'_>, construct: Construct) -> Self {
        let recv = node
            .child_by_field_name("receiver")
            .map(|list| r.field_list(list).text)
            .unwrap_or_default();
        let name = node
            .child_by_field_name("name")
            .map(|n| r.text(n).to_string())
            .unwrap_or_default();
        let type_params = node
            .child_by_field_name("type_parameters")
            .map(|list| r.type_params(list))
            .unwrap_or_default();
        let input = node
            .child_by_field_name("parameters")
            .map(|list| r.field_list(list).text)
            .unwrap_or_default();
        let output = match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => {
                let results = r.field_list(list);
                if results.fields == 0 {
                    String::new()
                } else {
                    format!("({})", results.text)
                }
            }
            Some(ty) => r.expr(ty),
            None => String::new(),
        };

        let mut full = String::from("func");
        if construct != Construct::FuncLit {
            full.push(' ');
            if !recv.is_empty() {
                full.push_str(&format!("({}) ", recv));
            }
            full.push_str(&name);
            full.push_str(&type_params);
        }
        full.push_str(&format!("({})", input));
        if !output.is_empty() {
            full.push(' ');
            full.push_str(&output);
        }

        FuncSignature {
            full,
            recv,
            name,
            input,
            output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncKind {
    /// A function or method declaration
    Declaration,
    /// An anonymous function
    Literal,
}

/// A declared or anonymous Go function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Func {
    #[serde(rename = "sig")]
    pub signature: FuncSignature,

    /// Position of the "func" keyword
    #[serde(rename = "func")]
    pub func_pos: Position,
    /// Position of "{", absent for bodiless declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbrace: Option<Position>,
    /// Position of "}", absent for bodiless declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rbrace: Option<Position>,

    /// Position of the doc comment, declarations only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Position>,

    #[serde(skip)]
    pub kind: FuncKind,
}

impl Func {
    pub fn is_declaration(&self) -> bool {
        self.kind == FuncKind::Declaration
    }

    pub fn is_literal(&self) -> bool {
        self.kind == FuncKind::Literal
    }

    fn valid_doc(&self) -> Option<&Position> {
        self.doc.as_ref().filter(|doc| doc.is_valid())
    }

    /// First offset considered part of the function by [`Funcs::enclosing_func`].
    ///
    /// A documented function starts at its doc. A function whose keyword and
    /// closing brace share a line starts at the beginning of that line.
    pub fn effective_start(&self) -> usize {
        if let Some(doc) = self.valid_doc() {
            return doc.offset;
        }
        match &self.rbrace {
            Some(rbrace) if rbrace.line == self.func_pos.line => {
                self.func_pos.offset.saturating_sub(self.func_pos.column)
            }
            _ => self.func_pos.offset,
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        match &self.rbrace {
            Some(rbrace) => self.effective_start() <= offset && offset <= rbrace.offset,
            None => false,
        }
    }

    /// Whether `offset` sits in the doc comment above the `func` keyword.
    fn doc_covers(&self, offset: usize) -> bool {
        self.valid_doc()
            .is_some_and(|doc| doc.offset <= offset && offset < self.func_pos.offset)
    }
}

impl fmt::Display for Func {
    // GNU error message format: file:line:col message
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            FuncKind::Declaration => self.signature.name.as_str(),
            FuncKind::Literal => "(literal)",
        };
        write!(
            f,
            "{}:{}:{} {}",
            self.func_pos.filename, self.func_pos.line, self.func_pos.column, name
        )
    }
}

/// Search direction for neighbor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Functions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Funcs(Vec<Func>);

fn no_functions() -> MotionError {
    MotionError::not_found("no functions found")
}

impl Funcs {
    /// All function declarations and literals below `root`, in pre-order.
    pub fn collect(filename: &str, source: &str, root: Node<'_>, comments: &Comments) -> Self {
        let renderer = Renderer::new(source);
        let funcs = preorder(root)
            .filter_map(|node| {
                let construct = Construct::of(node).filter(|c| c.is_func())?;
                let keyword = construct.keyword_node(node);
                let braces = construct.body_braces(node);
                let kind = if construct == Construct::FuncLit {
                    FuncKind::Literal
                } else {
                    FuncKind::Declaration
                };
                let doc = match kind {
                    FuncKind::Declaration => comments.doc_for(keyword.start_byte()).cloned(),
                    FuncKind::Literal => None,
                };
                Some(Func {
                    signature: FuncSignature::render(&renderer, node, construct),
                    func_pos: Position::start_of(filename, keyword),
                    lbrace: braces.map(|(l, _)| Position::start_of(filename, l)),
                    rbrace: braces.map(|(_, r)| Position::start_of(filename, r)),
                    doc,
                    kind,
                })
            })
            .collect();
        Funcs(funcs)
    }

    pub fn as_slice(&self) -> &[Func] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Func> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy holding only function declarations.
    pub fn declarations(&self) -> Funcs {
        Funcs(self.0.iter().filter(|f| f.is_declaration()).cloned().collect())
    }

    /// Innermost function around `offset`.
    ///
    /// Nested functions come after their parent in source order, so the last
    /// containing function wins.
    pub fn enclosing_func(&self, offset: usize) -> Result<&Func, MotionError> {
        self.0
            .iter()
            .rev()
            .find(|f| f.contains(offset))
            .ok_or_else(|| MotionError::not_found("no enclosing functions found"))
    }

    /// Nearest function after `offset`, skipping `shift` more.
    pub fn next_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.neighbor(offset, shift, Direction::Next)
    }

    /// Nearest function before `offset`, skipping `shift` more.
    pub fn prev_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.neighbor(offset, shift, Direction::Prev)
    }

    /// Binary search over the ascending `func` keyword offsets.
    ///
    /// i.e. for [a, b, c, d] with nearest next function b, shift 1 returns c,
    /// 2 returns d and anything larger is not found. A cursor inside the doc
    /// of the nearest next function moves on to the one after it.
    pub fn neighbor(
        &self,
        offset: usize,
        shift: i64,
        direction: Direction,
    ) -> Result<&Func, MotionError> {
        let shift = usize::try_from(shift)
            .map_err(|_| MotionError::invalid_input("shift can't be negative"))?;

        let index = match direction {
            Direction::Next => {
                let first = self.0.partition_point(|f| f.func_pos.offset <= offset);
                let nearest = self.0.get(first).ok_or_else(no_functions)?;
                let shift = if nearest.doc_covers(offset) {
                    shift.saturating_add(1)
                } else {
                    shift
                };
                first.checked_add(shift)
            }
            Direction::Prev => {
                let before = self.0.partition_point(|f| f.func_pos.offset < offset);
                shift.checked_add(1).and_then(|skip| before.checked_sub(skip))
            }
        };

        index
            .and_then(|i| self.0.get(i))
            .ok_or_else(no_functions)
    }
}

impl From<Vec<Func>> for Funcs {
    fn from(funcs: Vec<Func>) -> Self {
        Funcs(funcs)
    }
}

impl<'a> IntoIterator for &'a Funcs {
    type Item = &'a Func;
    type IntoIter = std::slice::Iter<'a, Func>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

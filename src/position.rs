use serde::Serialize;
use std::fmt;
use tree_sitter::{Node, Point};

/// A location in Go source.
///
/// `offset` is a 0-based byte offset, `line` and `column` are 1-based and the
/// column counts bytes, not characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub filename: String,
    pub offset: usize,
    pub line: usize,
    #[serde(rename = "col")]
    pub column: usize,
}

impl Position {
    pub fn new(filename: impl Into<String>, offset: usize, line: usize, column: usize) -> Self {
        Self {
            filename: filename.into(),
            offset,
            line,
            column,
        }
    }

    /// Build a position from a tree-sitter byte offset and its 0-based point.
    pub fn from_point(filename: &str, offset: usize, point: Point) -> Self {
        Self::new(filename, offset, point.row + 1, point.column + 1)
    }

    /// Position of the first byte of `node`.
    pub fn start_of(filename: &str, node: Node<'_>) -> Self {
        Self::from_point(filename, node.start_byte(), node.start_position())
    }

    /// Position just past the last byte of `node`.
    pub fn end_of(filename: &str, node: Node<'_>) -> Self {
        Self::from_point(filename, node.end_byte(), node.end_position())
    }

    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

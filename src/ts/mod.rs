//! Tree-sitter integration for Go source.
//!
//! This module owns everything that touches raw syntax nodes: the parser
//! wrapper, node classification, comment grouping and type rendering. The
//! indices built on top only store positions and rendered text.

pub mod comments;
pub mod errors;
pub mod kinds;
pub mod parser;
pub mod render;

pub use comments::{CommentGroup, Comments};
pub use errors::ParseError;
pub use kinds::Construct;
pub use parser::{preorder, GoParser, ParsedSource};
pub use render::{FieldList, Renderer};

//! Comment groups and lead-comment (doc) attachment.
//!
//! Tree-sitter reports every `//` line and `/* */` block as its own `comment`
//! extra. Go tooling reasons about *groups*: runs of comments with no token
//! and no blank line between them. A group that ends on the line right before
//! a token documents that token.

use crate::position::Position;
use crate::ts::parser::preorder;
use std::collections::HashMap;
use tree_sitter::Node;

/// A run of adjacent comments. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub start: Position,
    pub end: Position,
}

impl CommentGroup {
    /// Whether the cursor at `offset` touches this group. The start bound
    /// tolerates a cursor sitting one byte before the comment.
    pub fn touches(&self, offset: usize) -> bool {
        self.start.offset <= offset + 1 && self.end.offset >= offset
    }
}

/// Comment groups of one file plus the doc attachment index.
#[derive(Debug, Clone, Default)]
pub struct Comments {
    groups: Vec<CommentGroup>,
    // start byte of the documented token -> start of its lead comment group
    docs: HashMap<usize, Position>,
}

struct Pending {
    group: CommentGroup,
    end_row: usize,
    // opened on the same line as the preceding token
    trailing: bool,
}

impl Comments {
    /// Group all comments below `root`.
    pub fn collect(filename: &str, source: &str, root: Node<'_>) -> Self {
        let mut comments = Comments::default();
        let mut pending: Option<Pending> = None;
        let mut prev_token_row: Option<usize> = None;

        let leaves = preorder(root).filter(|n| n.child_count() == 0 && n.start_byte() < n.end_byte());
        for leaf in leaves {
            let row = leaf.start_position().row;

            if leaf.kind() != "comment" {
                if let Some(p) = pending.take() {
                    let documents = !p.trailing && row == p.end_row + 1;
                    if documents {
                        comments.docs.insert(leaf.start_byte(), p.group.start.clone());
                    }
                    comments.groups.push(p.group);
                }
                prev_token_row = Some(row);
                continue;
            }

            let end = comment_end(filename, source, leaf);
            let end_row = leaf.end_position().row;

            if let Some(p) = pending.as_mut() {
                let reach = if p.trailing { p.end_row } else { p.end_row + 1 };
                if row <= reach {
                    p.group.end = end;
                    p.end_row = end_row;
                    continue;
                }
            }
            if let Some(p) = pending.take() {
                comments.groups.push(p.group);
            }
            pending = Some(Pending {
                group: CommentGroup {
                    start: Position::start_of(filename, leaf),
                    end,
                },
                end_row,
                trailing: prev_token_row == Some(row),
            });
        }

        if let Some(p) = pending {
            comments.groups.push(p.group);
        }
        comments
    }

    pub fn groups(&self) -> &[CommentGroup] {
        &self.groups
    }

    /// Lead comment of the token starting at byte `token_start`.
    pub fn doc_for(&self, token_start: usize) -> Option<&Position> {
        self.docs.get(&token_start)
    }

    /// First group touching `offset`, in source order.
    pub fn at(&self, offset: usize) -> Option<&CommentGroup> {
        self.groups.iter().find(|g| g.touches(offset))
    }
}

/// End of a comment leaf. A `//` comment on a CRLF line does not own its `\r`.
fn comment_end(filename: &str, source: &str, leaf: Node<'_>) -> Position {
    let end = Position::end_of(filename, leaf);
    let text = source.get(leaf.byte_range()).unwrap_or_default();
    if !text.starts_with("//") {
        return end;
    }
    let cr = text.len() - text.trim_end_matches('\r').len();
    Position {
        offset: end.offset - cr,
        column: end.column.saturating_sub(cr),
        ..end
    }
}

//! Brace-delimited blocks and innermost-containment lookup.
//!
//! Each braced [`Block`] contributes a left and a right [`Border`]. Because
//! blocks come from a syntax tree they nest properly, so scanning borders
//! from the cursor backwards while counting unmatched right borders finds the
//! innermost block around the cursor.

use crate::error::MotionError;
use crate::position::Position;
use crate::ts::kinds::Construct;
use crate::ts::parser::preorder;
use serde::Serialize;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    For,
    Range,
    If,
    Select,
    Switch,
    TypeSwitch,
    Func,
}

impl BlockKind {
    fn from_construct(construct: Construct) -> Option<Self> {
        let kind = match construct {
            Construct::For => BlockKind::For,
            Construct::Range => BlockKind::Range,
            Construct::If => BlockKind::If,
            Construct::Select => BlockKind::Select,
            Construct::Switch => BlockKind::Switch,
            Construct::TypeSwitch => BlockKind::TypeSwitch,
            Construct::FuncDecl | Construct::MethodDecl | Construct::FuncLit => BlockKind::Func,
            Construct::TypeSpec | Construct::TypeAlias => return None,
        };
        Some(kind)
    }
}

/// Anything that owns a block: functions, loops, conditionals, switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Position of the introducing keyword
    #[serde(rename = "block")]
    pub block_pos: Position,
    /// Position of "{"
    pub lbrace: Option<Position>,
    /// Position of "}"
    pub rbrace: Option<Position>,
    #[serde(skip)]
    pub kind: BlockKind,
}

impl Block {
    pub fn is_braced(&self) -> bool {
        self.lbrace.is_some() && self.rbrace.is_some()
    }
}

/// Blocks of one file, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks(Vec<Block>);

impl Blocks {
    pub fn collect(filename: &str, root: Node<'_>) -> Self {
        let blocks = preorder(root)
            .filter_map(|node| {
                let construct = Construct::of(node)?;
                let kind = BlockKind::from_construct(construct)?;
                let braces = construct.body_braces(node);
                Some(Block {
                    block_pos: Position::start_of(filename, construct.keyword_node(node)),
                    lbrace: braces.map(|(l, _)| Position::start_of(filename, l)),
                    rbrace: braces.map(|(_, r)| Position::start_of(filename, r)),
                    kind,
                })
            })
            .collect();
        Blocks(blocks)
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn borders(&self) -> Borders {
        Borders::new(self)
    }

    /// Innermost block enclosing `offset`.
    pub fn enclosing_block(&self, offset: usize) -> Result<&Block, MotionError> {
        let index = self.borders().find_block(offset)?;
        Ok(&self.0[index])
    }
}

impl From<Vec<Block>> for Blocks {
    fn from(blocks: Vec<Block>) -> Self {
        Blocks(blocks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub offset: usize,
    pub side: Side,
    /// Index of the owning block in its [`Blocks`]
    pub block: usize,
}

/// Borders of a block list, sorted by descending offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Borders(Vec<Border>);

impl Borders {
    pub fn new(blocks: &Blocks) -> Self {
        let mut borders: Vec<Border> = blocks
            .0
            .iter()
            .enumerate()
            .filter_map(|(index, block)| {
                let (Some(l), Some(r)) = (&block.lbrace, &block.rbrace) else {
                    return None;
                };
                Some([
                    Border {
                        offset: l.offset,
                        side: Side::Left,
                        block: index,
                    },
                    Border {
                        offset: r.offset,
                        side: Side::Right,
                        block: index,
                    },
                ])
            })
            .flatten()
            .collect();
        borders.sort_by(|a, b| b.offset.cmp(&a.offset));
        Borders(borders)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the innermost block whose borders enclose `offset`.
    ///
    /// Borders at or after `offset` are skipped. Walking the rest from the
    /// closest one backwards, each right border opens a nested block that
    /// must be closed by a left border before an enclosing left border can
    /// match.
    pub fn find_block(&self, offset: usize) -> Result<usize, MotionError> {
        let mut unmatched_right = 0usize;

        for border in self.0.iter().filter(|b| b.offset < offset) {
            match border.side {
                Side::Right => unmatched_right += 1,
                Side::Left if unmatched_right == 0 => return Ok(border.block),
                Side::Left => unmatched_right -= 1,
            }
        }

        Err(MotionError::not_found("no block found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ts::parser::GoParser;

    fn blocks(source: &str) -> Blocks {
        let mut parser = GoParser::new().unwrap();
        let parsed = parser.parse_with_source("src.go", source).unwrap();
        Blocks::collect("src.go", parsed.root_node())
    }

    fn block(l: usize, r: usize) -> Block {
        Block {
            block_pos: Position::new("src.go", l.saturating_sub(1), 1, 1),
            lbrace: Some(Position::new("src.go", l, 1, 1)),
            rbrace: Some(Position::new("src.go", r, 1, 1)),
            kind: BlockKind::For,
        }
    }

    #[test]
    fn enclosing_block_prefers_the_loop() {
        let source = r#"package main

import "log"

func foo() error{
	for i:=0; i<10; i++ {
		log.Println(i)
	}
	return nil
}"#;
        let blocks = blocks(source);
        assert_eq!(blocks.len(), 2);

        let found = blocks.enclosing_block(80).unwrap();
        assert_eq!(found.kind, BlockKind::For);
        assert_eq!(found.lbrace.as_ref().unwrap().offset, 67);
    }

    #[test]
    fn offset_after_loop_resolves_to_function() {
        let source = "package p\nfunc foo() {\n for i:=0;i<1;i++ {\n x()\n }\n y()\n}";
        let blocks = blocks(source);
        let found = blocks.enclosing_block(source.find("y()").unwrap()).unwrap();
        assert_eq!(found.kind, BlockKind::Func);
        assert_eq!(found.block_pos.offset, source.find("func").unwrap());
    }

    #[test]
    fn lbrace_itself_is_outside_the_block() {
        let source = "package p\nfunc foo() {}";
        let blocks = blocks(source);
        let lbrace = source.find('{').unwrap();
        assert!(blocks.enclosing_block(lbrace).is_err());
        assert!(blocks.enclosing_block(lbrace + 1).is_ok());
    }

    #[test]
    fn no_block_outside_functions() {
        let source = "package p\n\nvar x = 1\n";
        let err = blocks(source).enclosing_block(12).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn bodiless_blocks_contribute_no_borders() {
        let source = "package p\n\nfunc now() int64\n\nfunc f() {\n\tif true {\n\t}\n}\n";
        let blocks = blocks(source);
        assert_eq!(blocks.len(), 3);
        assert!(!blocks.as_slice()[0].is_braced());
        assert_eq!(blocks.borders().len(), 4);
    }

    #[test]
    fn sibling_blocks_are_skipped() {
        // 0{ 1{ }5 6{ }9 }20
        let blocks = Blocks::from(vec![block(0, 20), block(1, 5), block(6, 9)]);
        assert_eq!(blocks.borders().find_block(12).unwrap(), 0);
        assert_eq!(blocks.borders().find_block(7).unwrap(), 2);
        assert_eq!(blocks.borders().find_block(3).unwrap(), 1);
        assert!(blocks.borders().find_block(0).is_err());
    }
}

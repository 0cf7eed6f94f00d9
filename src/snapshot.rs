//! Parsed sources and the indices derived from them.
//!
//! A [`Snapshot`] is built once per invocation. Every index (blocks, sorted
//! borders, functions, types, comment groups) is computed up front; queries
//! only read.

use crate::blocks::{Block, Blocks, Borders};
use crate::error::MotionError;
use crate::funcs::{Func, Funcs};
use crate::pool::with_parser;
use crate::ts::comments::{CommentGroup, Comments};
use crate::ts::errors::ParseError;
use crate::types::{Type, Types};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filename reported for sources passed as raw bytes.
pub const SRC_FILENAME: &str = "src.go";

/// Options passed into every parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Collect comment groups and doc attachments
    pub comments: bool,
    /// Descend into subdirectories when parsing a directory
    pub recursive: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comments: true,
            recursive: false,
        }
    }
}

/// Where the Go source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Src(Vec<u8>),
    File(PathBuf),
    Dir(PathBuf),
    None,
}

/// One parsed file and its indices.
#[derive(Debug)]
pub struct SourceFile {
    filename: String,
    source: String,
    tree: tree_sitter::Tree,
    blocks: Blocks,
    borders: Borders,
    funcs: Funcs,
    declarations: Funcs,
    types: Types,
    top_level_types: Types,
    comments: Comments,
}

impl SourceFile {
    pub fn parse(
        filename: impl Into<String>,
        source: String,
        options: ParserOptions,
    ) -> Result<Self, ParseError> {
        let filename = filename.into();
        let parsed = with_parser(|parser| parser.parse_with_source(&filename, &source))??;
        parsed.ensure_valid(&filename)?;
        let tree = parsed.tree;

        let (blocks, funcs, types, comments) = {
            let root = tree.root_node();
            let comments = if options.comments {
                Comments::collect(&filename, &source, root)
            } else {
                Comments::default()
            };
            let blocks = Blocks::collect(&filename, root);
            let funcs = Funcs::collect(&filename, &source, root, &comments);
            let types = Types::collect(&filename, &source, root, &comments);
            (blocks, funcs, types, comments)
        };
        let borders = blocks.borders();
        let declarations = funcs.declarations();
        let top_level_types = types.top_level();

        debug!(
            filename = %filename,
            bytes = source.len(),
            blocks = blocks.len(),
            funcs = funcs.len(),
            types = types.len(),
            comment_groups = comments.groups().len(),
            "indexed source file"
        );

        Ok(Self {
            filename,
            source,
            tree,
            blocks,
            borders,
            funcs,
            declarations,
            types,
            top_level_types,
            comments,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn funcs(&self) -> &Funcs {
        &self.funcs
    }

    pub fn declarations(&self) -> &Funcs {
        &self.declarations
    }

    pub fn types(&self) -> &Types {
        &self.types
    }

    pub fn top_level_types(&self) -> &Types {
        &self.top_level_types
    }

    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    /// Innermost braced block around `offset`, using the prebuilt borders.
    pub fn enclosing_block(&self, offset: usize) -> Result<&Block, MotionError> {
        let index = self.borders.find_block(offset)?;
        self.blocks
            .as_slice()
            .get(index)
            .ok_or_else(|| MotionError::not_found("no block found"))
    }

    pub fn enclosing_func(&self, offset: usize) -> Result<&Func, MotionError> {
        self.funcs.enclosing_func(offset)
    }

    pub fn next_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.declarations.next_func(offset, shift)
    }

    pub fn prev_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.declarations.prev_func(offset, shift)
    }

    pub fn comment_at(&self, offset: usize) -> Result<&CommentGroup, MotionError> {
        self.comments
            .at(offset)
            .ok_or_else(|| MotionError::not_found("no comment block at cursor position"))
    }
}

/// Immutable result of one parse invocation.
#[derive(Debug, Default)]
pub struct Snapshot {
    files: Vec<SourceFile>,
}

impl Snapshot {
    pub fn open(input: &Input, options: ParserOptions) -> Result<Self, ParseError> {
        match input {
            Input::Src(bytes) => Self::from_bytes(bytes, options),
            Input::File(path) => Self::from_file(path, options),
            Input::Dir(path) => Self::from_dir(path, options),
            Input::None => Err(ParseError::NoInput),
        }
    }

    pub fn from_source(source: &str, options: ParserOptions) -> Result<Self, ParseError> {
        let file = SourceFile::parse(SRC_FILENAME, source.to_string(), options)?;
        Ok(Self { files: vec![file] })
    }

    pub fn from_bytes(source: &[u8], options: ParserOptions) -> Result<Self, ParseError> {
        let source = String::from_utf8(source.to_vec()).map_err(|_| ParseError::InvalidUtf8 {
            filename: SRC_FILENAME.to_string(),
        })?;
        let file = SourceFile::parse(SRC_FILENAME, source, options)?;
        Ok(Self { files: vec![file] })
    }

    pub fn from_file(path: impl AsRef<Path>, options: ParserOptions) -> Result<Self, ParseError> {
        let file = parse_path(path.as_ref(), options)?;
        Ok(Self { files: vec![file] })
    }

    /// Parse every `.go` file of `dir`, in sorted path order.
    pub fn from_dir(dir: impl AsRef<Path>, options: ParserOptions) -> Result<Self, ParseError> {
        let dir = dir.as_ref();
        let max_depth = if options.recursive { usize::MAX } else { 1 };

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
            let entry = entry.map_err(|source| ParseError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            let is_go = entry.path().extension().is_some_and(|ext| ext == "go");
            if entry.file_type().is_file() && is_go {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(ParseError::NoGoFiles {
                path: dir.to_path_buf(),
            });
        }
        debug!(dir = %dir.display(), files = paths.len(), recursive = options.recursive, "parsing directory");

        let files = paths
            .iter()
            .map(|path| parse_path(path, options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { files })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The only file of the snapshot. Offset based queries need exactly one.
    pub fn single_file(&self) -> Result<&SourceFile, MotionError> {
        match self.files.as_slice() {
            [file] => Ok(file),
            [] => Err(MotionError::invalid_input("no source file parsed")),
            _ => Err(MotionError::invalid_input(
                "offset queries need a single file, got a directory",
            )),
        }
    }

    /// Length in bytes of the longest source.
    pub fn max_source_len(&self) -> usize {
        self.files.iter().map(|f| f.source.len()).max().unwrap_or(0)
    }

    pub fn funcs(&self) -> impl Iterator<Item = &Func> {
        self.files.iter().flat_map(|f| f.funcs.iter())
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Func> {
        self.files.iter().flat_map(|f| f.declarations.iter())
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.files.iter().flat_map(|f| f.types.iter())
    }

    pub fn top_level_types(&self) -> impl Iterator<Item = &Type> {
        self.files.iter().flat_map(|f| f.top_level_types.iter())
    }

    pub fn enclosing_block(&self, offset: usize) -> Result<&Block, MotionError> {
        self.single_file()?.enclosing_block(offset)
    }

    pub fn enclosing_func(&self, offset: usize) -> Result<&Func, MotionError> {
        self.single_file()?.enclosing_func(offset)
    }

    pub fn next_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.single_file()?.next_func(offset, shift)
    }

    pub fn prev_func(&self, offset: usize, shift: i64) -> Result<&Func, MotionError> {
        self.single_file()?.prev_func(offset, shift)
    }

    pub fn comment_at(&self, offset: usize) -> Result<&CommentGroup, MotionError> {
        self.single_file()?.comment_at(offset)
    }
}

fn parse_path(path: &Path, options: ParserOptions) -> Result<SourceFile, ParseError> {
    let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SourceFile::parse(path.display().to_string(), source, options)
}

//! Query dispatch.
//!
//! A [`Query`] selects one of the [`Mode`]s and is answered from an already
//! built [`Snapshot`]. Queries never mutate the snapshot, so the same query
//! always yields the same [`QueryResult`].

use crate::error::MotionError;
use crate::funcs::Func;
use crate::snapshot::Snapshot;
use crate::ts::comments::CommentGroup;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Enclosing,
    Next,
    Prev,
    Decls,
    Comment,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Enclosing => "enclosing",
            Mode::Next => "next",
            Mode::Prev => "prev",
            Mode::Decls => "decls",
            Mode::Comment => "comment",
        }
    }

    /// Whether the mode reads the cursor offset.
    pub fn uses_offset(&self) -> bool {
        !matches!(self, Mode::Decls)
    }
}

impl FromStr for Mode {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enclosing" => Ok(Mode::Enclosing),
            "next" => Ok(Mode::Next),
            "prev" => Ok(Mode::Prev),
            "decls" => Ok(Mode::Decls),
            "comment" => Ok(Mode::Comment),
            other => Err(MotionError::invalid_input(format!("wrong mode {other:?} passed"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration categories accepted by `decls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Type,
    Func,
}

impl Include {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "type" => Some(Include::Type),
            "func" => Some(Include::Func),
            _ => None,
        }
    }
}

/// A single query against a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Query {
    pub mode: String,
    pub offset: i64,
    #[serde(default)]
    pub shift: i64,
    #[serde(default)]
    pub includes: Vec<String>,
}

impl Query {
    pub fn new(mode: impl Into<String>, offset: i64) -> Self {
        Self {
            mode: mode.into(),
            offset,
            ..Self::default()
        }
    }

    pub fn with_shift(mut self, shift: i64) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }
}

/// One entry of a `decls` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decl {
    pub keyword: String,
    pub ident: String,
    pub full: String,
    pub filename: String,
    pub line: usize,
    #[serde(rename = "col")]
    pub column: usize,
}

impl From<&Type> for Decl {
    fn from(t: &Type) -> Self {
        Decl {
            keyword: "type".to_string(),
            ident: t.signature.name.clone(),
            full: t.signature.full.clone(),
            filename: t.type_pos.filename.clone(),
            line: t.type_pos.line,
            column: t.type_pos.column,
        }
    }
}

impl From<&Func> for Decl {
    fn from(f: &Func) -> Self {
        Decl {
            keyword: "func".to_string(),
            ident: f.signature.name.clone(),
            full: f.signature.full.clone(),
            filename: f.func_pos.filename.clone(),
            line: f.func_pos.line,
            column: f.func_pos.column,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} {} {}",
            self.filename, self.line, self.column, self.keyword, self.full
        )
    }
}

/// Line and column span of a comment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl From<&CommentGroup> for Comment {
    fn from(group: &CommentGroup) -> Self {
        Comment {
            start_line: group.start.line,
            start_col: group.start.column,
            end_line: group.end.line,
            end_col: group.end.column,
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

/// Result of a successful query. Only the field the mode fills is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decls: Vec<Decl>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub func: Option<Func>,
}

impl QueryResult {
    fn new(mode: Mode) -> Self {
        QueryResult {
            mode: mode.to_string(),
            comment: None,
            decls: Vec::new(),
            func: None,
        }
    }
}

/// Answer `query` from `snapshot`.
pub fn run_query(snapshot: &Snapshot, query: &Query) -> Result<QueryResult, MotionError> {
    let mode: Mode = query.mode.parse()?;
    debug!(mode = %mode, offset = query.offset, shift = query.shift, "running query");

    let mut result = QueryResult::new(mode);
    if !mode.uses_offset() {
        result.decls = collect_decls(snapshot, &query.includes);
        return Ok(result);
    }

    let offset = checked_offset(snapshot, query.offset)?;
    match mode {
        Mode::Enclosing => result.func = Some(snapshot.enclosing_func(offset)?.clone()),
        Mode::Next => result.func = Some(snapshot.next_func(offset, query.shift)?.clone()),
        Mode::Prev => result.func = Some(snapshot.prev_func(offset, query.shift)?.clone()),
        Mode::Comment => result.comment = Some(Comment::from(snapshot.comment_at(offset)?)),
        Mode::Decls => {}
    }
    Ok(result)
}

impl Snapshot {
    pub fn run(&self, query: &Query) -> Result<QueryResult, MotionError> {
        run_query(self, query)
    }
}

fn checked_offset(snapshot: &Snapshot, offset: i64) -> Result<usize, MotionError> {
    let len = snapshot.max_source_len();
    usize::try_from(offset)
        .ok()
        .filter(|&o| o <= len)
        .ok_or_else(|| {
            MotionError::invalid_input(format!("offset {offset} is out of range [0, {len}]"))
        })
}

// Category-major: all types then all funcs for ["type", "func"].
fn collect_decls(snapshot: &Snapshot, includes: &[String]) -> Vec<Decl> {
    let mut decls = Vec::new();
    for name in includes {
        match Include::parse(name) {
            Some(Include::Type) => decls.extend(snapshot.top_level_types().map(Decl::from)),
            Some(Include::Func) => decls.extend(snapshot.declarations().map(Decl::from)),
            None => warn!(include = %name, "ignoring unknown declaration category"),
        }
    }
    decls
}

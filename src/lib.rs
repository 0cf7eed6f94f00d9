//! Go Motion: positional queries over Go source for editor integrations
//!
//! Parses Go files with tree-sitter once into a [`Snapshot`] and answers
//! cursor based questions from it: the enclosing function or block, the
//! next or previous declaration, the comment block under the cursor, and
//! the list of top level declarations.
//!
//! # Architecture
//!
//! - [`ts`] wraps the tree-sitter Go grammar: parsing, node kinds, comment
//!   groups and signature rendering.
//! - [`blocks`], [`funcs`] and [`types`] extract indices from a tree.
//! - [`snapshot`] builds every index once per parse.
//! - [`query`] dispatches a [`Query`] over a snapshot.
//! - [`output`] encodes results as JSON, Vimscript or plain text.
//!
//! # Example
//!
//! ```no_run
//! use go_motion::{ParserOptions, Query, Snapshot};
//!
//! let src = "package main\n\nfunc main() {\n\tprintln(1)\n}\n";
//! let snapshot = Snapshot::from_source(src, ParserOptions::default()).unwrap();
//!
//! match snapshot.run(&Query::new("enclosing", 30)) {
//!     Ok(result) => println!("{:?}", result.func),
//!     Err(e) => eprintln!("query failed: {}", e),
//! }
//! ```

pub mod blocks;
pub mod config;
pub mod error;
pub mod funcs;
pub mod output;
pub mod pool;
pub mod position;
pub mod query;
pub mod snapshot;
pub mod ts;
pub mod types;

pub use blocks::{Block, BlockKind, Blocks, Border, Borders, Side};
pub use error::{ErrorKind, MotionError};
pub use funcs::{Direction, Func, FuncKind, FuncSignature, Funcs};
pub use output::{ErrorResult, Format};
pub use position::Position;
pub use query::{run_query, Comment, Decl, Include, Mode, Query, QueryResult};
pub use snapshot::{Input, ParserOptions, Snapshot, SourceFile};
pub use ts::{CommentGroup, Comments, ParseError};
pub use types::{Type, TypeSignature, Types};

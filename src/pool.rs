//! Thread-local parser pooling.
//!
//! Parsing a directory touches many files; each thread keeps one
//! [`GoParser`] and reuses it for every file it parses.

use crate::ts::{GoParser, ParseError};
use std::cell::RefCell;

thread_local! {
    static GO_PARSER: RefCell<Option<GoParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// On first call per thread, creates new parser. Subsequent calls reuse
/// the same parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use go_motion::pool::with_parser;
///
/// let _tree = with_parser(|parser| parser.parse("main.go", "package main"))??;
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, ParseError>
where
    F: FnOnce(&mut GoParser) -> R,
{
    GO_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let mut parser = match slot.take() {
            Some(parser) => parser,
            None => GoParser::new()?,
        };
        let result = f(&mut parser);
        *slot = Some(parser);
        Ok(result)
    })
}

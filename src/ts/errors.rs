use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse {filename}")]
    ParseFailed { filename: String },

    #[error("{filename}:{line}:{column}: syntax error")]
    SyntaxError {
        filename: String,
        line: usize,
        column: usize,
    },

    #[error("{filename} is not valid UTF-8")]
    InvalidUtf8 { filename: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("no Go files found in {path}")]
    NoGoFiles { path: PathBuf },

    #[error("file, src or dir is not specified")]
    NoInput,
}

use crate::ts::errors::ParseError;
use thiserror::Error;

/// Errors returned by motion queries.
///
/// Every variant is a value the editor displays; none of them aborts the
/// session.
#[derive(Error, Debug)]
pub enum MotionError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    ParseFailure,
}

impl MotionError {
    pub fn not_found(message: impl Into<String>) -> Self {
        MotionError::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        MotionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MotionError::NotFound { .. } => ErrorKind::NotFound,
            MotionError::InvalidInput { .. } => ErrorKind::InvalidInput,
            MotionError::Parse(_) => ErrorKind::ParseFailure,
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoresError>;

/// Why a single input line was refused.
#[derive(Error, Debug)]
pub enum LineError {
    #[error("missing score separator \": \"")]
    MissingSeparator,

    #[error("malformed score prefix: {0:?}")]
    MalformedScore(String),

    #[error("malformed JSON body")]
    MalformedJson(#[source] serde_json::Error),

    #[error("JSON body is not an object")]
    NotAnObject,

    #[error("missing id field")]
    MissingId,

    #[error("invalid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The line does not have the `<integer>: <JSON object>` shape.
    Format,
    /// The line is well-formed but the object lacks a required field.
    Schema,
}

impl LineError {
    pub fn kind(&self) -> LineErrorKind {
        match self {
            LineError::MissingId => LineErrorKind::Schema,
            _ => LineErrorKind::Format,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScoresError {
    #[error("n must be a positive integer, got {0:?}")]
    InvalidLimit(String),

    #[error("input file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}")]
    Line {
        line: usize,
        #[source]
        source: LineError,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to render output")]
    Output(#[from] serde_json::Error),
}

/// Failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Usage,
    NotFound,
    Format,
    Schema,
    Unexpected,
}

impl ScoresError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ScoresError::InvalidLimit(_) => ErrorClass::Usage,
            ScoresError::NotFound { .. } => ErrorClass::NotFound,
            ScoresError::Line { source, .. } => match source.kind() {
                LineErrorKind::Format => ErrorClass::Format,
                LineErrorKind::Schema => ErrorClass::Schema,
            },
            ScoresError::Io(_) | ScoresError::Output(_) => ErrorClass::Unexpected,
        }
    }
}

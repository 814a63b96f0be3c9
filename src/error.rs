use std::path::PathBuf;
use thiserror::Error;

/// Reasons a polygon label line is skipped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineError {
    #[error("too few tokens: expected at least 7 (class id + 3 vertices), found {found}")]
    TooFewTokens { found: usize },

    #[error("invalid class id '{0}'; expected non-negative integer")]
    InvalidClassId(String),

    #[error("odd number of coordinates: {0}")]
    OddCoordinateCount(usize),

    #[error("non-numeric coordinate '{0}'")]
    NonNumeric(String),

    #[error("coordinate {0} is outside [0, 1]")]
    OutOfRange(f64),

    #[error("polygon needs at least 3 vertices, found {0}")]
    TooFewVertices(usize),
}

/// File and directory level failures.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid label lines in {} ({skipped} skipped)", path.display())]
    NoValidLines { path: PathBuf, skipped: usize },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
}

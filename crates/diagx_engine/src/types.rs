use std::io;
use std::path::PathBuf;

use diagx_core::Category;

use crate::DecodeError;

/// One uploaded file before staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub category: Category,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, category: Category) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            category,
        }
    }
}

/// A staged file awaiting extraction. `filename` is the display name used in
/// tables and the summary; `path` is the staged copy, removed after processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub path: PathBuf,
    pub filename: String,
    pub category: Category,
    /// 1-based position among the uploads of the same category.
    pub position: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("no events found in {filename}")]
    NoMatch { filename: String },
    #[error("invalid JSON in {filename} line {line}: {message}")]
    MalformedPayload {
        filename: String,
        line: usize,
        message: String,
    },
    #[error("file not found: {}", .path.display())]
    MissingFile { path: PathBuf },
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of one extraction attempt on one file.
#[derive(Debug)]
pub enum FileOutcome<T> {
    Extracted(T),
    /// The file parsed but matched nothing.
    Empty,
    Failed(ExtractError),
}

impl<T> From<Result<T, ExtractError>> for FileOutcome<T> {
    fn from(result: Result<T, ExtractError>) -> Self {
        match result {
            Ok(value) => FileOutcome::Extracted(value),
            Err(ExtractError::NoMatch { .. }) => FileOutcome::Empty,
            Err(err) => FileOutcome::Failed(err),
        }
    }
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::editor::DocumentId;

/// Errors surfaced by the session core
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("could not open {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not save {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no document with id {0}")]
    NotFound(DocumentId),

    #[error("line {line} does not exist (document has {total} lines)")]
    LineOutOfRange { line: usize, total: usize },

    #[error("document {0} has no file path yet")]
    Untitled(DocumentId),

    #[error("{} is already open in document {id}", .path.display())]
    AlreadyOpen { path: PathBuf, id: DocumentId },
}

impl ScribeError {
    /// True for failures reported by the file-access layer
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScribeError>;

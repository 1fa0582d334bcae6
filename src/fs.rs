//! File access used by the session's open and save flows.
//!
//! The core never touches the disk directly. Everything goes through
//! [`FileAccess`], so hosts can swap in their own storage.

use std::path::Path;

use crate::error::{Result, ScribeError};

/// Reads and writes whole UTF-8 text files
pub trait FileAccess {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Plain files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFiles;

impl FileAccess for DiskFiles {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| ScribeError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|source| ScribeError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFiles;

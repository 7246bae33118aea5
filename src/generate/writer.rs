//! Writing generated files into a project.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// What happened to a file write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written.
    Written,
    /// File already existed and overwriting was not allowed.
    Exists,
}

/// Writes files relative to a project root.
#[derive(Debug, Clone)]
pub struct ConfigWriter {
    root: PathBuf,
}

impl ConfigWriter {
    /// Create a writer for the given project root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether `relative` already exists under the root.
    pub fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// Returns [`WriteOutcome::Exists`] without touching the file when it
    /// exists and `overwrite` is false.
    pub fn write(&self, relative: &str, content: &str, overwrite: bool) -> Result<WriteOutcome> {
        let path = self.root.join(relative);
        if path.exists() && !overwrite {
            tracing::debug!("Not overwriting {}", path.display());
            return Ok(WriteOutcome::Exists);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        tracing::info!("Wrote {}", path.display());
        Ok(WriteOutcome::Written)
    }
}

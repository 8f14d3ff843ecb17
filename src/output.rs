//! Output tree management
//!
//! The output root is owned by a single run: it is deleted and recreated
//! before anything is written, then filled with files mirroring the input
//! tree.

use crate::error::{Result, ScrubError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    /// Delete `root` if present and create it empty.
    ///
    /// Refuses to run when `root` is, or contains, `input`.
    pub fn recreate(root: &Path, input: &Path) -> Result<Self> {
        let root_abs = absolute(root);
        let input_abs = absolute(input);
        if input_abs.starts_with(&root_abs) {
            return Err(ScrubError::OverlappingRoots {
                input: input.to_path_buf(),
                output: root.to_path_buf(),
            });
        }

        let prepare_error = |source| ScrubError::OutputDir {
            path: root.to_path_buf(),
            source,
        };

        if root.exists() {
            debug!("Removing previous output at {}", root.display());
            fs::remove_dir_all(root).map_err(prepare_error)?;
        }
        fs::create_dir_all(root).map_err(prepare_error)?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `contents` at `relative` under the root, creating parents
    pub fn write(&self, relative: &Path, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        write_file(&path, contents)?;
        Ok(path)
    }
}

/// Write a file, creating its parent directories
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| ScrubError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

/// Best-effort absolute form of `path` for overlap checks
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}
